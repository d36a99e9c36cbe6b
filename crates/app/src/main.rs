mod problem;
mod router;
mod telemetry;
mod tenant;

use std::net::SocketAddr;

use tracing::{info, warn};
use tradepros_core::TenantCatalog;
use tradepros_util::{load_env_file, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let resolver = TenantCatalog::builtin()?.resolver(config.tenant_override.clone());
    let registry = resolver.registry();
    if let Some(id) = resolver.env_override() {
        if !registry.contains(id) {
            warn!(
                stage = "app",
                tenant_id = id,
                default = registry.default_id(),
                "tenant override is not registered; falling back to default"
            );
        }
    }
    info!(
        stage = "app",
        tenants = registry.len(),
        default = registry.default_id(),
        base_domain = resolver.domains().base_domain(),
        tenant_override = resolver.env_override().unwrap_or("none"),
        "tenant catalog loaded"
    );

    let state = router::AppState::new(metrics, resolver);

    let addr: SocketAddr = config.bind_addr;
    info!(stage = "app", %addr, env = %config.environment.as_str(), "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}
