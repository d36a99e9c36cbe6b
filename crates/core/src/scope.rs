//! Tenant qualification for downstream API calls.
//!
//! Every tenant-scoped call made by a consumer of the resolved configuration
//! carries the tenant id, either as a `tenantId` query parameter or as a
//! trailing path segment.

use std::sync::LazyLock;

use serde::Serialize;
use thiserror::Error;
use url::{Position, Url};

use crate::tenant::TenantConfig;

pub const TENANT_QUERY_PARAM: &str = "tenantId";

static RELATIVE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://tenant.invalid/").expect("static base url is valid"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("endpoint path must be server-relative: {0}")]
    InvalidPath(String),
    #[error("invalid endpoint path: {0}")]
    Parse(#[from] url::ParseError),
    #[error("url cannot carry path segments: {0}")]
    CannotBeABase(String),
}

/// Where the tenant id goes in a scoped call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeStyle {
    Query,
    Segment,
}

/// A downstream endpoint already qualified with the tenant id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedEndpoint {
    pub consumer: &'static str,
    pub method: &'static str,
    pub style: ScopeStyle,
    pub path: String,
}

const DOWNSTREAM_ENDPOINTS: &[(&str, &str, &str, ScopeStyle)] = &[
    ("booking_wizard", "GET", "/api/bookings/upcoming", ScopeStyle::Query),
    ("booking_wizard", "POST", "/api/bookings", ScopeStyle::Query),
    ("estimator_config", "GET", "/api/estimator-config", ScopeStyle::Segment),
    ("estimator_config", "PUT", "/api/estimator-config", ScopeStyle::Segment),
    ("analytics_dashboard", "GET", "/api/analytics/dashboard", ScopeStyle::Query),
    ("analytics_dashboard", "GET", "/api/analytics/geography", ScopeStyle::Query),
    ("crm", "GET", "/api/crew/leads", ScopeStyle::Query),
    ("blog", "GET", "/api/blog/posts", ScopeStyle::Query),
    ("credits", "GET", "/api/credits", ScopeStyle::Segment),
];

/// Qualifies URLs and paths with one tenant's id.
#[derive(Debug, Clone, Copy)]
pub struct TenantScope<'a> {
    tenant_id: &'a str,
}

impl<'a> TenantScope<'a> {
    pub fn new(tenant_id: &'a str) -> Self {
        Self { tenant_id }
    }

    pub fn for_tenant(config: &'a TenantConfig) -> Self {
        Self::new(&config.id)
    }

    pub fn tenant_id(&self) -> &'a str {
        self.tenant_id
    }

    /// Appends `tenantId=<id>` to the query, keeping existing pairs.
    pub fn with_query(&self, url: &Url) -> Url {
        let mut scoped = url.clone();
        scoped
            .query_pairs_mut()
            .append_pair(TENANT_QUERY_PARAM, self.tenant_id);
        scoped
    }

    /// Appends the tenant id as the last path segment.
    pub fn with_segment(&self, url: &Url) -> Result<Url, ScopeError> {
        let mut scoped = url.clone();
        scoped
            .path_segments_mut()
            .map_err(|_| ScopeError::CannotBeABase(url.to_string()))?
            .pop_if_empty()
            .push(self.tenant_id);
        Ok(scoped)
    }

    /// Scopes a server-relative path such as `/api/bookings?limit=5`.
    ///
    /// Absolute and scheme-relative (`//host/...`) inputs are rejected rather
    /// than having their host dropped.
    pub fn path(&self, path: &str, style: ScopeStyle) -> Result<String, ScopeError> {
        if !path.starts_with('/') || path.starts_with("//") || path.starts_with("/\\") {
            return Err(ScopeError::InvalidPath(path.to_string()));
        }
        let url = RELATIVE_BASE.join(path)?;
        let scoped = match style {
            ScopeStyle::Query => self.with_query(&url),
            ScopeStyle::Segment => self.with_segment(&url)?,
        };
        Ok(scoped[Position::BeforePath..].to_string())
    }

    /// Scoped versions of the endpoints consumed by the storefront surfaces.
    pub fn downstream_endpoints(&self) -> Result<Vec<ScopedEndpoint>, ScopeError> {
        DOWNSTREAM_ENDPOINTS
            .iter()
            .map(|(consumer, method, path, style)| {
                Ok(ScopedEndpoint {
                    consumer: *consumer,
                    method: *method,
                    style: *style,
                    path: self.path(path, *style)?,
                })
            })
            .collect()
    }
}
