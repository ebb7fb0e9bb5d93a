use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Core module trait that all Libris modules must implement.
///
/// A module owns its dependencies (store handles, outbound clients) from the
/// moment it is constructed, so `routes` can hand out a router with its state
/// already applied.
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup before the HTTP server binds
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes are merged at the server root, so paths must be absolute
    fn routes(&self) -> Router {
        Router::new()
    }
}
