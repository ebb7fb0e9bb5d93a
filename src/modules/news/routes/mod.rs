//! HTTP handler for `/news`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use libris_http::{error::ErrorResponse, AppError};

use super::gateway::NewsGateway;
use super::models::{NewsQuery, NewsResponse};

pub fn router(gateway: NewsGateway) -> Router {
    Router::new()
        .route("/news", get(search_news))
        .with_state(gateway)
}

/// Search headlines through the news provider.
///
/// Filters are optional and forwarded as-is; only the supplied ones reach the provider.
#[utoipa::path(
    get,
    path = "/news",
    params(NewsQuery),
    responses(
        (status = 200, description = "Matching headlines", body = NewsResponse),
        (status = 400, description = "Unreadable query string", body = ErrorResponse),
        (status = 500, description = "News provider failure", body = ErrorResponse),
    ),
    tag = "news"
)]
pub async fn search_news(
    State(gateway): State<NewsGateway>,
    filters: Result<Query<NewsQuery>, QueryRejection>,
) -> Result<Json<NewsResponse>, AppError> {
    let Query(filters) =
        filters.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(Json(gateway.search(&filters).await?))
}
