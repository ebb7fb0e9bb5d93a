//! HTTP handlers for `/books`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use libris_http::{error::ErrorResponse, AppError};

use super::models::{Book, BookPayload, DeleteConfirmation, NewBook};
use super::repository::BookRepository;

pub fn router(repository: BookRepository) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", put(update_book).delete(delete_book))
        .with_state(repository)
}

/// Boundary presence check: runs before the repository is touched.
fn accept(payload: Result<Json<BookPayload>, JsonRejection>) -> Result<NewBook, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    payload
        .validate()
        .map_err(|missing| AppError::validation(missing.details(), missing.message()))
}

/// List every book in store order.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 500, description = "Document store failure", body = ErrorResponse),
    ),
    tag = "books"
)]
pub async fn list_books(
    State(repository): State<BookRepository>,
) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(repository.list().await?))
}

/// Create a book; the store assigns its id.
#[utoipa::path(
    post,
    path = "/books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "A required field is missing", body = ErrorResponse),
        (status = 500, description = "Document store failure", body = ErrorResponse),
    ),
    tag = "books"
)]
pub async fn create_book(
    State(repository): State<BookRepository>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = accept(payload)?;
    let created = repository.create(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace all fields of an existing book.
#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "A required field is missing", body = ErrorResponse),
        (status = 404, description = "No book with this id", body = ErrorResponse),
        (status = 500, description = "Document store failure", body = ErrorResponse),
    ),
    tag = "books"
)]
pub async fn update_book(
    State(repository): State<BookRepository>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let book = accept(payload)?;
    Ok(Json(repository.update(&id, book).await?))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = DeleteConfirmation),
        (status = 404, description = "No book with this id", body = ErrorResponse),
        (status = 500, description = "Document store failure", body = ErrorResponse),
    ),
    tag = "books"
)]
pub async fn delete_book(
    State(repository): State<BookRepository>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    repository.delete(&id).await?;
    Ok(Json(DeleteConfirmation::book_deleted()))
}
