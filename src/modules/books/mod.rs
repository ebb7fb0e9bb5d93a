pub mod models;
pub mod repository;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{InitCtx, Module};
use mongodb::Database;
use utoipa::OpenApi;

use repository::{BookRepository, BookStore};
use store::MongoBookStore;

/// Book catalogue: CRUD over the `books` collection
pub struct BooksModule {
    repository: BookRepository,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            repository: BookRepository::new(store),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            database = %ctx.settings.database.name,
            collection = store::COLLECTION,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repository.clone())
    }
}

/// OpenAPI fragment for the books routes
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::list_books,
        routes::create_book,
        routes::update_book,
        routes::delete_book,
    ),
    components(schemas(models::Book, models::BookPayload, models::DeleteConfirmation)),
    tags((name = "books", description = "Book catalogue CRUD"))
)]
pub struct BooksApi;

/// Create the books module over the given database
pub fn create_module(db: &Database) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(MongoBookStore::new(db))))
}
