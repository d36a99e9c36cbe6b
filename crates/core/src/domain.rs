use std::{
    collections::{hash_map::Entry, HashMap},
    net::IpAddr,
};

use thiserror::Error;

use crate::registry::TenantRegistry;

/// Errors raised while assembling a [`DomainIndex`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainIndexError {
    #[error("reserved base domain is not configured")]
    MissingBaseDomain,
    #[error("reserved base domain must have exactly two labels: {0}")]
    InvalidBaseDomain(String),
    #[error("subdomain label must be a single non-empty DNS label: {0}")]
    InvalidSubdomainLabel(String),
    #[error("hostname must not be empty")]
    EmptyHostname,
    #[error("hostname mapped twice: {0}")]
    DuplicateDomain(String),
    #[error("subdomain label mapped twice: {0}")]
    DuplicateSubdomain(String),
    #[error("'{key}' maps to unregistered tenant '{tenant_id}'")]
    UnknownTenant { key: String, tenant_id: String },
}

/// How a hostname matched the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMatchKind {
    Exact,
    Subdomain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostMatch<'a> {
    pub tenant_id: &'a str,
    pub kind: HostMatchKind,
}

/// Immutable hostname and subdomain lookup tables.
#[derive(Debug, Clone)]
pub struct DomainIndex {
    domains: HashMap<String, String>,
    subdomains: HashMap<String, String>,
    base_domain: String,
}

impl DomainIndex {
    pub fn builder() -> DomainIndexBuilder {
        DomainIndexBuilder::default()
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Maps a raw hostname to a tenant id.
    ///
    /// `None` means the host is not mapped; callers decide the fallback.
    pub fn resolve_host(&self, hostname: &str) -> Option<HostMatch<'_>> {
        let host = normalize_host(hostname);
        if host.is_empty() {
            return None;
        }

        if let Some(tenant_id) = self.domains.get(&host) {
            return Some(HostMatch {
                tenant_id,
                kind: HostMatchKind::Exact,
            });
        }

        let label = self.subdomain_label(&host)?;
        self.subdomains.get(label).map(|tenant_id| HostMatch {
            tenant_id,
            kind: HostMatchKind::Subdomain,
        })
    }

    /// Returns the leftmost label when `host` sits under the reserved base
    /// domain with at least three labels in total.
    fn subdomain_label<'h>(&self, host: &'h str) -> Option<&'h str> {
        if host.parse::<IpAddr>().is_ok() {
            return None;
        }

        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 3 {
            return None;
        }

        let base = labels[labels.len() - 2..].join(".");
        (base == self.base_domain).then_some(labels[0])
    }
}

/// Lowercases the host and strips surrounding whitespace, a trailing port and
/// a trailing dot. IPv6 literals lose their brackets.
pub fn normalize_host(raw: &str) -> String {
    let host = raw.trim().to_ascii_lowercase();

    let host = if let Some(rest) = host.strip_prefix('[') {
        rest.split_once(']')
            .map(|(inner, _)| inner.to_string())
            .unwrap_or_default()
    } else {
        match host.split_once(':') {
            // More than one colon means a bare IPv6 literal, which has no port.
            Some((name, port)) if !port.contains(':') => name.to_string(),
            _ => host,
        }
    };

    match host.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Collects domain and subdomain records and validates them against a
/// registry.
#[derive(Debug, Default)]
pub struct DomainIndexBuilder {
    base_domain: Option<String>,
    domains: Vec<(String, String)>,
    subdomains: Vec<(String, String)>,
}

impl DomainIndexBuilder {
    pub fn base_domain(mut self, base_domain: impl Into<String>) -> Self {
        self.base_domain = Some(base_domain.into());
        self
    }

    pub fn domain(mut self, hostname: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        self.domains.push((hostname.into(), tenant_id.into()));
        self
    }

    pub fn subdomain(mut self, label: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        self.subdomains.push((label.into(), tenant_id.into()));
        self
    }

    pub fn build(self, registry: &TenantRegistry) -> Result<DomainIndex, DomainIndexError> {
        let raw_base = self
            .base_domain
            .ok_or(DomainIndexError::MissingBaseDomain)?;
        let base_domain = normalize_host(&raw_base);
        let base_labels: Vec<&str> = base_domain.split('.').collect();
        if base_labels.len() != 2 || base_labels.iter().any(|label| label.is_empty()) {
            return Err(DomainIndexError::InvalidBaseDomain(raw_base));
        }

        let mut domains = HashMap::with_capacity(self.domains.len());
        for (hostname, tenant_id) in self.domains {
            let key = normalize_host(&hostname);
            if key.is_empty() {
                return Err(DomainIndexError::EmptyHostname);
            }
            ensure_registered(registry, &key, &tenant_id)?;
            match domains.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(DomainIndexError::DuplicateDomain(entry.key().clone()))
                }
                Entry::Vacant(entry) => {
                    entry.insert(tenant_id);
                }
            }
        }

        let mut subdomains = HashMap::with_capacity(self.subdomains.len());
        for (label, tenant_id) in self.subdomains {
            let key = label.trim().to_ascii_lowercase();
            if key.is_empty() || key.contains('.') || key.contains(':') {
                return Err(DomainIndexError::InvalidSubdomainLabel(label));
            }
            ensure_registered(registry, &key, &tenant_id)?;
            match subdomains.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(DomainIndexError::DuplicateSubdomain(entry.key().clone()))
                }
                Entry::Vacant(entry) => {
                    entry.insert(tenant_id);
                }
            }
        }

        Ok(DomainIndex {
            domains,
            subdomains,
            base_domain,
        })
    }
}

fn ensure_registered(
    registry: &TenantRegistry,
    key: &str,
    tenant_id: &str,
) -> Result<(), DomainIndexError> {
    if registry.contains(tenant_id) {
        Ok(())
    } else {
        Err(DomainIndexError::UnknownTenant {
            key: key.to_string(),
            tenant_id: tenant_id.to_string(),
        })
    }
}
