//! Libris application library
//!
//! Book catalogue and news proxy modules, plus the wiring that serves them.

pub mod modules;
pub mod openapi;
pub mod utils;

use anyhow::Context;
use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Connect dependencies, register modules, and serve HTTP until the listener fails.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        database = %settings.database.name,
        "libris bootstrap starting"
    );

    let db = libris_db::connect(&settings.database)
        .await
        .context("failed to set up the document store")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &settings, &db).context("failed to register modules")?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;

    tracing::info!(modules = registry.module_count(), "libris bootstrap complete");

    libris_http::start_server(&registry, &settings, openapi::document()).await
}
