use std::{collections::HashMap, sync::Arc};

use thiserror::Error;
use tracing::debug;

use crate::tenant::TenantConfig;

/// Errors raised while assembling a [`TenantRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tenant registry must contain at least one tenant")]
    Empty,
    #[error("tenant id must not be empty")]
    EmptyTenantId,
    #[error("tenant id registered twice: {0}")]
    DuplicateTenant(String),
    #[error("default tenant is not registered: {0}")]
    MissingDefault(String),
}

/// Immutable mapping from tenant id to its configuration.
///
/// Exactly one tenant is the default and it is guaranteed to be present, so
/// [`TenantRegistry::get_by_id`] can always return a configuration.
#[derive(Debug)]
pub struct TenantRegistry {
    tenants: HashMap<String, Arc<TenantConfig>>,
    default_id: String,
}

impl TenantRegistry {
    pub fn new<I>(default_id: impl Into<String>, tenants: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = TenantConfig>,
    {
        let default_id = default_id.into();
        let mut map = HashMap::new();
        for tenant in tenants {
            if tenant.id.is_empty() {
                return Err(RegistryError::EmptyTenantId);
            }
            if map.contains_key(&tenant.id) {
                return Err(RegistryError::DuplicateTenant(tenant.id));
            }
            map.insert(tenant.id.clone(), Arc::new(tenant));
        }

        if map.is_empty() {
            return Err(RegistryError::Empty);
        }
        if !map.contains_key(&default_id) {
            return Err(RegistryError::MissingDefault(default_id));
        }

        Ok(Self {
            tenants: map,
            default_id,
        })
    }

    /// Returns the tenant registered under `id`, or the default tenant when
    /// the id is unknown.
    pub fn get_by_id(&self, id: &str) -> &Arc<TenantConfig> {
        match self.tenants.get(id) {
            Some(tenant) => tenant,
            None => {
                debug!(stage = "tenant", tenant_id = %id, fallback = %self.default_id, "unknown tenant id, serving default tenant");
                self.default_tenant()
            }
        }
    }

    /// Strict lookup without the default fallback.
    pub fn get(&self, id: &str) -> Option<&Arc<TenantConfig>> {
        self.tenants.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tenants.contains_key(id)
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn default_tenant(&self) -> &Arc<TenantConfig> {
        // Presence of the default is checked in `new`.
        &self.tenants[&self.default_id]
    }

    /// Registered tenant ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.tenants.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenants;

    fn registry() -> TenantRegistry {
        TenantRegistry::new(
            "npp",
            [
                tenants::nashville_painting_professionals(),
                tenants::paint_pros_demo(),
                tenants::roof_pros(),
            ],
        )
        .expect("registry builds")
    }

    #[test]
    fn every_registered_id_round_trips() {
        let registry = registry();
        for id in registry.ids() {
            assert_eq!(registry.get_by_id(id).id, id);
        }
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        let registry = registry();
        let tenant = registry.get_by_id("does-not-exist");
        assert_eq!(tenant.id, "npp");
        assert!(Arc::ptr_eq(tenant, registry.default_tenant()));
        assert!(registry.get("does-not-exist").is_none());
    }

    #[test]
    fn rejects_missing_default() {
        let err = TenantRegistry::new("ghost", [tenants::paint_pros_demo()])
            .expect_err("default must be registered");
        assert_eq!(err, RegistryError::MissingDefault("ghost".to_string()));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = TenantRegistry::new(
            "demo",
            [tenants::paint_pros_demo(), tenants::paint_pros_demo()],
        )
        .expect_err("duplicates are rejected");
        assert_eq!(err, RegistryError::DuplicateTenant("demo".to_string()));
    }

    #[test]
    fn rejects_empty_registry() {
        let err = TenantRegistry::new("npp", Vec::new()).expect_err("empty registry");
        assert_eq!(err, RegistryError::Empty);
    }
}
