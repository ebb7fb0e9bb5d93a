pub mod gateway;
pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{settings::NewsSettings, InitCtx, Module};
use utoipa::OpenApi;

use gateway::NewsGateway;

/// Pass-through headline search against the news provider
pub struct NewsModule {
    gateway: NewsGateway,
}

impl NewsModule {
    pub fn new(gateway: NewsGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Module for NewsModule {
    fn name(&self) -> &'static str {
        "news"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            endpoint = %self.gateway.endpoint(),
            "news module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.gateway.clone())
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(routes::search_news),
    components(schemas(models::NewsResponse, models::NewsArticle)),
    tags((name = "news", description = "Headline search proxied to the news provider"))
)]
pub struct NewsApi;

/// Create the news module; fails when the provider credential is missing
pub fn create_module(settings: &NewsSettings) -> anyhow::Result<Arc<dyn Module>> {
    Ok(Arc::new(NewsModule::new(NewsGateway::new(settings)?)))
}
