use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics::counter;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{info, warn};
use tradepros_core::{
    ResolutionSource, Resolver, ScopedEndpoint, TenantConfig, TenantOverride, TenantScope,
    VerticalProfile,
};

use crate::problem::{ProblemResponse, NO_TRADE_VERTICAL, SCOPE_FAILED};
use crate::telemetry;
use crate::tenant::{tenant_context_layer, CurrentTenant};

#[derive(Clone)]
pub struct AppState {
    metrics: PrometheusHandle,
    resolver: Arc<Resolver>,
}

impl AppState {
    pub fn new(metrics: PrometheusHandle, resolver: Resolver) -> Self {
        Self {
            metrics,
            resolver: Arc::new(resolver),
        }
    }

    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }

    pub fn resolver(&self) -> Arc<Resolver> {
        Arc::clone(&self.resolver)
    }
}

pub fn app_router(state: AppState) -> Router {
    let tenant_api: Router<AppState> = Router::new()
        .route("/api/tenant", get(current_tenant))
        .route("/api/tenant/resolution", get(resolution))
        .route("/api/tenant/vertical", get(trade_vertical))
        .route("/api/tenant/endpoints", get(scoped_endpoints))
        .route("/api/tenant/estimator-only", get(estimator_only))
        .route("/api/tenant/preview", post(preview))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            tenant_context_layer,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .merge(tenant_api)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = telemetry::render_metrics(state.metrics());
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}

fn record_request(route: &'static str) {
    counter!("api_tenant_requests_total", "route" => route).increment(1);
}

async fn current_tenant(tenant: CurrentTenant) -> Json<TenantConfig> {
    record_request("tenant");
    Json(TenantConfig::clone(tenant.config()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolutionView {
    host: Option<String>,
    tenant_id: String,
    source: ResolutionSource,
}

async fn resolution(tenant: CurrentTenant) -> Json<ResolutionView> {
    record_request("resolution");
    let context = tenant.context();
    let resolution = context.resolution();
    Json(ResolutionView {
        host: context.host().map(str::to_string),
        tenant_id: resolution.tenant_id.clone(),
        source: resolution.source,
    })
}

async fn trade_vertical(tenant: CurrentTenant) -> Result<Json<VerticalProfile>, ProblemResponse> {
    record_request("vertical");
    let config = tenant.config();
    config
        .trade_vertical
        .map(|vertical| Json(vertical.profile()))
        .ok_or_else(|| {
            ProblemResponse::new(
                StatusCode::NOT_FOUND,
                NO_TRADE_VERTICAL,
                "tenant is not assigned to a trade vertical",
            )
            .for_tenant(&config.id)
        })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EndpointsView {
    tenant_id: String,
    endpoints: Vec<ScopedEndpoint>,
}

async fn scoped_endpoints(tenant: CurrentTenant) -> Result<Json<EndpointsView>, ProblemResponse> {
    record_request("endpoints");
    let config = tenant.config();
    let endpoints = TenantScope::for_tenant(config)
        .downstream_endpoints()
        .map_err(|err| {
            warn!(stage = "tenant", tenant_id = %config.id, error = %err, "failed to scope downstream endpoints");
            ProblemResponse::new(StatusCode::INTERNAL_SERVER_ERROR, SCOPE_FAILED, err.to_string())
                .for_tenant(&config.id)
        })?;

    Ok(Json(EndpointsView {
        tenant_id: config.id.clone(),
        endpoints,
    }))
}

async fn estimator_only(tenant: CurrentTenant) -> Json<TenantConfig> {
    record_request("estimator_only");
    Json(tenant.context().derive(&TenantOverride::estimator_only()))
}

async fn preview(
    tenant: CurrentTenant,
    payload: Result<Json<TenantOverride>, JsonRejection>,
) -> Result<Json<TenantConfig>, ProblemResponse> {
    record_request("preview");
    let tenant_id = &tenant.config().id;
    let Json(overrides) = payload.map_err(|rejection| {
        info!(stage = "tenant", %tenant_id, error = %rejection, "rejected tenant override");
        ProblemResponse::from(rejection).for_tenant(tenant_id)
    })?;

    Ok(Json(tenant.context().derive(&overrides)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, response::Response};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;
    use tradepros_core::TenantCatalog;

    fn setup_state(env_override: Option<&str>) -> AppState {
        let metrics = telemetry::init_metrics().expect("metrics init");
        let resolver = TenantCatalog::builtin()
            .expect("builtin catalog")
            .resolver(env_override.map(str::to_string));
        AppState::new(metrics, resolver)
    }

    fn get_request(uri: &str, host: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(host) = host {
            builder = builder.header(header::HOST, host);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let collected = response
            .into_body()
            .collect()
            .await
            .expect("body should read");
        serde_json::from_slice(&collected.to_bytes()).expect("json body")
    }

    #[tokio::test]
    async fn healthz_returns_ok() {
        let app = app_router(setup_state(None));

        let response = app
            .oneshot(get_request("/healthz", None))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_exports_build_info() {
        let app = app_router(setup_state(None));

        let response = app
            .oneshot(get_request("/metrics", None))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let collected = response
            .into_body()
            .collect()
            .await
            .expect("body should read");
        let body = String::from_utf8(collected.to_bytes().to_vec()).expect("utf-8");
        assert!(body.contains("app_build_info"));
        assert!(body.contains("app_uptime_seconds"));
    }

    #[tokio::test]
    async fn tenant_follows_host_header() {
        let app = app_router(setup_state(None));

        let response = app
            .oneshot(get_request("/api/tenant", Some("WWW.ROOFPROS.IO:8443")))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["id"], "roofpros");
        assert_eq!(body["tradeVertical"], "roofing");
        assert_eq!(body["subscriptionTier"], "estimator_only");
    }

    #[tokio::test]
    async fn unmapped_host_serves_default_tenant() {
        let app = app_router(setup_state(Some("demo")));

        let response = app
            .oneshot(get_request(
                "/api/tenant/resolution",
                Some("some-unregistered-domain.com"),
            ))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["tenantId"], "npp");
        assert_eq!(body["source"], "default");
        assert_eq!(body["host"], "some-unregistered-domain.com");
    }

    #[tokio::test]
    async fn missing_host_uses_env_override() {
        let app = app_router(setup_state(Some("demo")));

        let response = app
            .oneshot(get_request("/api/tenant/resolution", None))
            .await
            .expect("handler should respond");

        let body = read_json(response).await;
        assert_eq!(body["tenantId"], "demo");
        assert_eq!(body["source"], "environment");
        assert_eq!(body["host"], Value::Null);
    }

    #[tokio::test]
    async fn subdomain_resolution_is_reported() {
        let app = app_router(setup_state(None));

        let response = app
            .oneshot(get_request("/api/tenant/resolution", Some("demo.paintpros.io")))
            .await
            .expect("handler should respond");

        let body = read_json(response).await;
        assert_eq!(body["tenantId"], "demo");
        assert_eq!(body["source"], "subdomain");
    }

    #[tokio::test]
    async fn vertical_profile_for_tenant() {
        let app = app_router(setup_state(None));

        let response = app
            .oneshot(get_request("/api/tenant/vertical", Some("roofpros.io")))
            .await
            .expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["vertical"], "roofing");
        assert_eq!(body["terminology"]["estimate"], "Quote");
    }

    #[tokio::test]
    async fn endpoints_carry_tenant_id() {
        let app = app_router(setup_state(None));

        let response = app
            .oneshot(get_request("/api/tenant/endpoints", Some("nashpaintpros.io")))
            .await
            .expect("handler should respond");

        let body = read_json(response).await;
        assert_eq!(body["tenantId"], "npp");
        let endpoints = body["endpoints"].as_array().expect("endpoint list");
        assert!(!endpoints.is_empty());
        assert!(endpoints.iter().any(|endpoint| {
            endpoint["path"] == "/api/analytics/dashboard?tenantId=npp"
        }));
        assert!(endpoints
            .iter()
            .any(|endpoint| endpoint["path"] == "/api/estimator-config/npp"));
    }

    #[tokio::test]
    async fn estimator_only_derivation() {
        let app = app_router(setup_state(None));

        let response = app
            .oneshot(get_request("/api/tenant/estimator-only", Some("paintpros.io")))
            .await
            .expect("handler should respond");

        let body = read_json(response).await;
        assert_eq!(body["id"], "demo");
        assert_eq!(body["subscriptionTier"], "estimator_only");
        assert_eq!(body["features"]["estimator"], true);
        assert_eq!(body["features"]["portfolio"], false);
        assert_eq!(body["branding"]["name"], "Your Painting Company");
    }

    #[tokio::test]
    async fn preview_merges_override_body() {
        let app = app_router(setup_state(None));

        let request = Request::builder()
            .method("POST")
            .uri("/api/tenant/preview")
            .header(header::HOST, "nashvillepaintingprofessionals.com")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"branding":{"tagline":"Fresh coats"},"features":{"blog":true}}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.expect("handler should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["id"], "npp");
        assert_eq!(body["branding"]["tagline"], "Fresh coats");
        assert_eq!(body["branding"]["name"], "Nashville Painting Professionals");
        assert_eq!(body["features"]["blog"], true);
        assert_eq!(body["features"]["portfolio"], true);
    }

    #[tokio::test]
    async fn preview_rejects_unknown_fields_as_problem() {
        let app = app_router(setup_state(None));

        let request = Request::builder()
            .method("POST")
            .uri("/api/tenant/preview")
            .header(header::HOST, "nashpaintpros.io")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"colour":"red"}"#))
            .unwrap();

        let response = app.oneshot(request).await.expect("handler should respond");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
        let body = read_json(response).await;
        assert_eq!(body["type"], "/problems/invalid-tenant-override");
        assert_eq!(body["tenantId"], "npp");
    }

    #[tokio::test]
    async fn preview_cannot_reassign_tenant_identity() {
        let app = app_router(setup_state(None));

        let request = Request::builder()
            .method("POST")
            .uri("/api/tenant/preview")
            .header(header::HOST, "nashpaintpros.io")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":"roofpros"}"#))
            .unwrap();

        let response = app.oneshot(request).await.expect("handler should respond");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert_eq!(body["type"], "/problems/invalid-tenant-override");
        assert_eq!(body["tenantId"], "npp");
    }

    #[tokio::test]
    async fn preview_rejects_malformed_json() {
        let app = app_router(setup_state(None));

        let request = Request::builder()
            .method("POST")
            .uri("/api/tenant/preview")
            .header(header::HOST, "nashpaintpros.io")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.expect("handler should respond");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
