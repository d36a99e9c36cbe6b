use std::sync::Arc;

use thiserror::Error;

use crate::domain::{DomainIndex, DomainIndexError};
use crate::registry::{RegistryError, TenantRegistry};
use crate::resolver::Resolver;
use crate::tenants;

/// Tenant served when nothing else resolves.
pub const DEFAULT_TENANT_ID: &str = "npp";

/// Base domain whose subdomains are looked up by label.
pub const RESERVED_BASE_DOMAIN: &str = "paintpros.io";

const DOMAIN_RECORDS: &[(&str, &str)] = &[
    ("paintpros.io", "demo"),
    ("www.paintpros.io", "demo"),
    ("nashpaintpros.io", "npp"),
    ("www.nashpaintpros.io", "npp"),
    ("nashvillepaintingprofessionals.com", "npp"),
    ("www.nashvillepaintingprofessionals.com", "npp"),
    ("roofpros.io", "roofpros"),
    ("www.roofpros.io", "roofpros"),
    ("localhost", "npp"),
];

const SUBDOMAIN_RECORDS: &[(&str, &str)] = &[
    ("nashpaintpros", "npp"),
    ("npp", "npp"),
    ("demo", "demo"),
    ("www", "demo"),
    ("roofpros", "roofpros"),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid tenant registry: {0}")]
    Registry(#[from] RegistryError),
    #[error("invalid domain index: {0}")]
    DomainIndex(#[from] DomainIndexError),
}

/// Registry and domain index built together at start-up.
#[derive(Debug, Clone)]
pub struct TenantCatalog {
    pub registry: Arc<TenantRegistry>,
    pub domains: Arc<DomainIndex>,
}

impl TenantCatalog {
    /// Builds the tenants and domain tables shipped with the deployment.
    pub fn builtin() -> Result<Self, CatalogError> {
        let registry = TenantRegistry::new(
            DEFAULT_TENANT_ID,
            [
                tenants::nashville_painting_professionals(),
                tenants::paint_pros_demo(),
                tenants::roof_pros(),
            ],
        )?;

        let builder = DomainIndex::builder().base_domain(RESERVED_BASE_DOMAIN);
        let builder = DOMAIN_RECORDS
            .iter()
            .fold(builder, |builder, (host, tenant)| builder.domain(*host, *tenant));
        let builder = SUBDOMAIN_RECORDS
            .iter()
            .fold(builder, |builder, (label, tenant)| {
                builder.subdomain(*label, *tenant)
            });
        let domains = builder.build(&registry)?;

        Ok(Self {
            registry: Arc::new(registry),
            domains: Arc::new(domains),
        })
    }

    /// Creates a resolver over this catalog with the start-up tenant override.
    pub fn resolver(&self, env_override: Option<String>) -> Resolver {
        Resolver::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.domains),
            env_override,
        )
    }
}
