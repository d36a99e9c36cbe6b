use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::overrides::{build_derived, TenantOverride};
use crate::resolver::{Resolution, Resolver};
use crate::tenant::TenantConfig;

/// Lifecycle of a [`TenantContext`]. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Unresolved,
    Resolved,
}

#[derive(Debug)]
struct Resolved {
    resolution: Resolution,
    tenant: Arc<TenantConfig>,
}

/// Tenant identity for one rendering context (a page load or a request).
///
/// The resolver runs on first access and the result is cached for the rest of
/// the context's lifetime, so every consumer observes the same configuration.
#[derive(Debug)]
pub struct TenantContext {
    resolver: Arc<Resolver>,
    host: Option<String>,
    resolved: OnceLock<Resolved>,
}

impl TenantContext {
    pub fn new(resolver: Arc<Resolver>, host: Option<String>) -> Self {
        Self {
            resolver,
            host,
            resolved: OnceLock::new(),
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn state(&self) -> ContextState {
        if self.resolved.get().is_some() {
            ContextState::Resolved
        } else {
            ContextState::Unresolved
        }
    }

    /// Returns the tenant for this context, resolving it on first access.
    pub fn tenant(&self) -> &Arc<TenantConfig> {
        &self.get().tenant
    }

    pub fn resolution(&self) -> &Resolution {
        &self.get().resolution
    }

    /// Builds a derived configuration on top of this context's tenant.
    pub fn derive(&self, overrides: &TenantOverride) -> TenantConfig {
        build_derived(self.tenant(), overrides)
    }

    fn get(&self) -> &Resolved {
        self.resolved.get_or_init(|| {
            let resolution = self.resolver.resolve_id(self.host.as_deref());
            let tenant = self.resolver.config_for(&resolution);
            debug!(
                stage = "tenant",
                host = self.host.as_deref().unwrap_or("-"),
                tenant_id = %resolution.tenant_id,
                source = resolution.source.as_str(),
                tier = tenant.subscription_tier.as_str(),
                "tenant resolved"
            );
            Resolved { resolution, tenant }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TenantCatalog;
    use crate::resolver::ResolutionSource;
    use crate::tenant::SubscriptionTier;

    fn resolver() -> Arc<Resolver> {
        Arc::new(
            TenantCatalog::builtin()
                .expect("builtin catalog is valid")
                .resolver(Some("demo".to_string())),
        )
    }

    #[test]
    fn starts_unresolved_and_resolves_once() {
        let context = TenantContext::new(resolver(), Some("roofpros.io".to_string()));
        assert_eq!(context.state(), ContextState::Unresolved);

        let first = Arc::clone(context.tenant());
        assert_eq!(context.state(), ContextState::Resolved);

        let second = context.tenant();
        assert!(Arc::ptr_eq(&first, second));
        assert!(std::ptr::eq(context.tenant(), context.tenant()));
        assert_eq!(first.id, "roofpros");
        assert_eq!(context.state(), ContextState::Resolved);
    }

    #[test]
    fn contexts_are_independent() {
        let resolver = resolver();
        let storefront = TenantContext::new(Arc::clone(&resolver), Some("paintpros.io".into()));
        let render = TenantContext::new(resolver, None);

        assert_eq!(storefront.tenant().id, "demo");
        assert_eq!(storefront.resolution().source, ResolutionSource::Domain);
        assert_eq!(render.state(), ContextState::Unresolved);
        assert_eq!(render.resolution().source, ResolutionSource::Environment);
    }

    #[test]
    fn derive_does_not_touch_the_cached_tenant() {
        let context = TenantContext::new(resolver(), Some("nashpaintpros.io".to_string()));
        let derived = context.derive(&TenantOverride::estimator_only());

        assert_eq!(derived.subscription_tier, SubscriptionTier::EstimatorOnly);
        assert!(derived.features.estimator);
        assert!(!derived.features.portfolio);
        assert_eq!(context.tenant().subscription_tier, SubscriptionTier::FullSuite);
        assert!(context.tenant().features.portfolio);
    }
}
