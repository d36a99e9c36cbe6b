//! Tenant resolution and configuration engine.
//!
//! A [`TenantCatalog`] is built once at start-up from the tenants and domain
//! tables shipped with the deployment. Its [`Resolver`] maps an inbound
//! hostname to a [`TenantConfig`], and a [`TenantContext`] memoizes that
//! answer for one rendering context.

pub mod catalog;
pub mod context;
pub mod domain;
pub mod overrides;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod tenant;
pub mod tenants;
pub mod vertical;

pub use catalog::{CatalogError, TenantCatalog, DEFAULT_TENANT_ID, RESERVED_BASE_DOMAIN};
pub use context::{ContextState, TenantContext};
pub use domain::{normalize_host, DomainIndex, DomainIndexError, HostMatch, HostMatchKind};
pub use overrides::{build_derived, TenantOverride};
pub use registry::{RegistryError, TenantRegistry};
pub use resolver::{Resolution, ResolutionSource, Resolver};
pub use scope::{ScopeError, ScopeStyle, ScopedEndpoint, TenantScope};
pub use tenant::{Features, SubscriptionTier, TenantConfig};
pub use vertical::{TradeVertical, VerticalProfile};
