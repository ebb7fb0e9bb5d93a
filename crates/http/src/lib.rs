//! HTTP server facade for Libris with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::Router;
use utoipa::openapi::OpenApi;

use libris_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod router;

pub use error::AppError;
use router::RouterBuilder;

/// Start the HTTP server with the given module registry
///
/// Runs until the listener fails; there is no shutdown path.
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &Settings,
    openapi: OpenApi,
) -> anyhow::Result<()> {
    let address = settings.server.bind_address();
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, openapi);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, openapi: OpenApi) -> Router {
    let mut router_builder = RouterBuilder::new().route("/healthz", router::health_route());

    for module in registry.modules() {
        router_builder = router_builder.mount_module(module.name(), module.routes());
    }

    router_builder
        .with_openapi(openapi)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .build()
}
