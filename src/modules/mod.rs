pub mod books;
pub mod news;

use libris_kernel::{settings::Settings, ModuleRegistry};
use mongodb::Database;

/// Register all feature modules with the registry, wiring in their dependencies
pub fn register_all(
    registry: &mut ModuleRegistry,
    settings: &Settings,
    db: &Database,
) -> anyhow::Result<()> {
    registry.register(books::create_module(db))?;
    registry.register(news::create_module(&settings.news)?)?;
    Ok(())
}
