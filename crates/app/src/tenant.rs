use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use metrics::counter;
use tradepros_core::{ContextState, TenantConfig, TenantContext};

use crate::problem::{ProblemResponse, TENANT_CONTEXT_MISSING};
use crate::router::AppState;

/// Installs a fresh [`TenantContext`] on every request.
///
/// Nothing is resolved here; the first handler or extractor that reads the
/// tenant triggers resolution for the rest of the request.
pub async fn tenant_context_layer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let host = request_host(&request);
    let context = Arc::new(TenantContext::new(state.resolver(), host));
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Hostname the client addressed, from `Host` or the HTTP/2 authority.
///
/// A present but non-UTF-8 header is kept (lossily) so it resolves as an
/// unmapped host rather than as a missing one.
fn request_host(request: &Request) -> Option<String> {
    match request.headers().get(header::HOST) {
        Some(value) => Some(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        None => request
            .uri()
            .authority()
            .map(|authority| authority.as_str().to_string()),
    }
}

/// Extractor giving handlers the request's tenant context.
pub struct CurrentTenant(pub Arc<TenantContext>);

impl CurrentTenant {
    pub fn config(&self) -> &Arc<TenantConfig> {
        self.0.tenant()
    }

    pub fn context(&self) -> &TenantContext {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentTenant
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<Arc<TenantContext>>()
            .cloned()
            .ok_or_else(|| {
                ProblemResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    TENANT_CONTEXT_MISSING,
                    "tenant context layer is not installed on this route",
                )
            })?;

        if context.state() == ContextState::Unresolved {
            let source = context.resolution().source;
            counter!("tenant_resolutions_total", "source" => source.as_str()).increment(1);
        }

        Ok(Self(context))
    }
}
