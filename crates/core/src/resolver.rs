use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::{DomainIndex, HostMatchKind};
use crate::registry::TenantRegistry;
use crate::tenant::TenantConfig;

/// Which precedence rule produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Domain,
    Subdomain,
    Environment,
    Default,
}

impl ResolutionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Subdomain => "subdomain",
            Self::Environment => "environment",
            Self::Default => "default",
        }
    }
}

/// Tenant id chosen for a hostname, with the rule that chose it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub tenant_id: String,
    pub source: ResolutionSource,
}

/// Turns a hostname (or its absence) into a tenant configuration.
///
/// Precedence is strict: a domain or subdomain match when a hostname is
/// available, then the environment override when no hostname is available,
/// then the registry's default tenant. Resolution never fails.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<TenantRegistry>,
    domains: Arc<DomainIndex>,
    env_override: Option<String>,
}

impl Resolver {
    pub fn new(
        registry: Arc<TenantRegistry>,
        domains: Arc<DomainIndex>,
        env_override: Option<String>,
    ) -> Self {
        Self {
            registry,
            domains,
            env_override,
        }
    }

    pub fn registry(&self) -> &TenantRegistry {
        &self.registry
    }

    pub fn domains(&self) -> &DomainIndex {
        &self.domains
    }

    pub fn env_override(&self) -> Option<&str> {
        self.env_override.as_deref()
    }

    /// Resolves the tenant configuration for `hostname`.
    pub fn resolve(&self, hostname: Option<&str>) -> Arc<TenantConfig> {
        let resolution = self.resolve_id(hostname);
        self.config_for(&resolution)
    }

    /// Returns the registered configuration for a previous resolution.
    pub fn config_for(&self, resolution: &Resolution) -> Arc<TenantConfig> {
        Arc::clone(self.registry.get_by_id(&resolution.tenant_id))
    }

    /// Resolves only the tenant id and the rule that selected it.
    pub fn resolve_id(&self, hostname: Option<&str>) -> Resolution {
        match hostname {
            Some(host) => match self.domains.resolve_host(host) {
                Some(matched) => Resolution {
                    tenant_id: matched.tenant_id.to_string(),
                    source: match matched.kind {
                        HostMatchKind::Exact => ResolutionSource::Domain,
                        HostMatchKind::Subdomain => ResolutionSource::Subdomain,
                    },
                },
                None => {
                    debug!(stage = "tenant", %host, fallback = %self.registry.default_id(), "unmapped host, serving default tenant");
                    self.default_resolution()
                }
            },
            None => match self.env_override.as_deref() {
                Some(id) if self.registry.contains(id) => Resolution {
                    tenant_id: id.to_string(),
                    source: ResolutionSource::Environment,
                },
                Some(id) => {
                    debug!(stage = "tenant", tenant_id = %id, fallback = %self.registry.default_id(), "unknown tenant override, serving default tenant");
                    self.default_resolution()
                }
                None => self.default_resolution(),
            },
        }
    }

    fn default_resolution(&self) -> Resolution {
        Resolution {
            tenant_id: self.registry.default_id().to_string(),
            source: ResolutionSource::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TenantCatalog;
    use crate::vertical::TradeVertical;

    fn resolver(env_override: Option<&str>) -> Resolver {
        TenantCatalog::builtin()
            .expect("builtin catalog is valid")
            .resolver(env_override.map(str::to_string))
    }

    #[test]
    fn resolves_literal_domains() {
        let resolver = resolver(None);
        let tenant = resolver.resolve(Some("nashvillepaintingprofessionals.com"));
        assert_eq!(tenant.id, "npp");

        let roof = resolver.resolve(Some("roofpros.io"));
        assert_eq!(roof.id, "roofpros");
        assert_eq!(roof.trade_vertical, Some(TradeVertical::Roofing));
    }

    #[test]
    fn resolves_subdomains_of_the_base_domain() {
        let resolver = resolver(None);
        let resolution = resolver.resolve_id(Some("demo.paintpros.io"));
        assert_eq!(resolution.tenant_id, "demo");
        assert_eq!(resolution.source, ResolutionSource::Subdomain);
    }

    #[test]
    fn normalizes_before_matching() {
        let resolver = resolver(None);
        let resolution = resolver.resolve_id(Some("WWW.NASHPAINTPROS.IO"));
        assert_eq!(resolution.tenant_id, "npp");
        assert_eq!(resolution.source, ResolutionSource::Domain);

        let with_port = resolver.resolve(Some("www.nashpaintpros.io:443"));
        let without_port = resolver.resolve(Some("www.nashpaintpros.io"));
        assert!(Arc::ptr_eq(&with_port, &without_port));
    }

    #[test]
    fn bare_base_domain_uses_exact_table() {
        let resolver = resolver(None);
        let resolution = resolver.resolve_id(Some("paintpros.io"));
        assert_eq!(resolution.tenant_id, "demo");
        assert_eq!(resolution.source, ResolutionSource::Domain);
    }

    #[test]
    fn unmapped_hosts_degrade_to_default() {
        let resolver = resolver(Some("demo"));
        for host in ["some-unregistered-domain.com", "", "   ", ":8080", "[", "a.b.c.d.e"] {
            let resolution = resolver.resolve_id(Some(host));
            assert_eq!(resolution.tenant_id, "npp", "host {host:?}");
            assert_eq!(resolution.source, ResolutionSource::Default);
        }
    }

    #[test]
    fn env_override_applies_only_without_hostname() {
        let resolver = resolver(Some("demo"));
        let resolution = resolver.resolve_id(None);
        assert_eq!(resolution.tenant_id, "demo");
        assert_eq!(resolution.source, ResolutionSource::Environment);

        assert_eq!(resolver.resolve(Some("roofpros.io")).id, "roofpros");
    }

    #[test]
    fn missing_hostname_without_override_uses_default() {
        let resolver = resolver(None);
        let resolution = resolver.resolve_id(None);
        assert_eq!(resolution.tenant_id, "npp");
        assert_eq!(resolution.source, ResolutionSource::Default);
    }

    #[test]
    fn unknown_override_degrades_to_default() {
        let resolver = resolver(Some("nobody"));
        let resolution = resolver.resolve_id(None);
        assert_eq!(resolution.tenant_id, "npp");
        assert_eq!(resolution.source, ResolutionSource::Default);
    }

    #[test]
    fn exposes_injected_tables_and_override() {
        let resolver = resolver(Some("demo"));
        assert_eq!(resolver.env_override(), Some("demo"));
        assert_eq!(resolver.registry().default_id(), "npp");
        assert_eq!(resolver.domains().base_domain(), "paintpros.io");
        assert_eq!(self::resolver(None).env_override(), None);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let resolver = resolver(None);
        let first = resolver.resolve(Some("demo.paintpros.io"));
        let second = resolver.resolve(Some("demo.paintpros.io"));
        assert!(Arc::ptr_eq(&first, &second));
    }
}
