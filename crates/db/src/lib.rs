//! MongoDB client factory.

use anyhow::Context;
use libris_kernel::settings::DatabaseSettings;
use mongodb::{options::ClientOptions, Client, Database};

const APP_NAME: &str = "libris";

/// Build a database handle from settings.
///
/// The driver connects lazily: this only parses the URI and sets up the
/// pool, so an unreachable server surfaces on the first query rather than here.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    let mut options = ClientOptions::parse(&settings.uri)
        .await
        .with_context(|| "failed to parse MongoDB connection string")?;
    options.app_name = Some(APP_NAME.to_string());

    let client = Client::with_options(options).with_context(|| "failed to create MongoDB client")?;

    tracing::info!(
        target: "libris-db",
        database = %settings.name,
        "document store client ready"
    );

    Ok(client.database(&settings.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_selects_configured_database() {
        let settings = DatabaseSettings {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            name: "libris_test".to_string(),
        };

        let db = connect(&settings).await.unwrap();
        assert_eq!(db.name(), "libris_test");
    }

    #[tokio::test]
    async fn connect_rejects_malformed_uri() {
        let settings = DatabaseSettings {
            uri: "postgres://nope".to_string(),
            name: "libris".to_string(),
        };

        assert!(connect(&settings).await.is_err());
    }
}
