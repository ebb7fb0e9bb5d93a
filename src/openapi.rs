//! OpenAPI document assembled from the route annotations of every module.

use utoipa::OpenApi;

use crate::modules::{books::BooksApi, news::NewsApi};
use libris_http::error::{ErrorBody, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Book catalogue CRUD backed by MongoDB, plus a headline search proxied to the news provider."
    ),
    components(schemas(ErrorResponse, ErrorBody))
)]
struct ApiDoc;

/// The full API description served at `/openapi.json` and printed by `libris openapi`.
pub fn document() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(BooksApi::openapi());
    doc.merge(NewsApi::openapi());
    doc
}
