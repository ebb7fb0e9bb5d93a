//! Error handling for the Libris HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned for every persistence failure.
pub const STORE_FAILURE_MESSAGE: &str = "Internal server error";
/// Message returned for every news provider failure.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch news";

/// Envelope for all HTTP error responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Standard error payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code, e.g. `validation_error`
    pub code: String,
    pub message: String,
    /// Per-field detail for validation failures; empty otherwise
    #[schema(value_type = Vec<Object>)]
    pub details: Vec<serde_json::Value>,
    /// Correlates the response with the server-side log line
    pub trace_id: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("document store failure: {0:#}")]
    Store(anyhow::Error),

    #[error("upstream failure: {0:#}")]
    Upstream(anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Wrap a persistence failure; the cause is logged, never returned
    pub fn store(source: impl Into<anyhow::Error>) -> Self {
        Self::Store(source.into())
    }

    /// Wrap a news provider failure; the cause is logged, never returned
    pub fn upstream(source: impl Into<anyhow::Error>) -> Self {
        Self::Upstream(source.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let now = OffsetDateTime::now_utc();
        let timestamp = now.format(&Rfc3339).unwrap_or_else(|_| now.to_string());
        let status = self.status();

        let cause = |source: &anyhow::Error| format!("{source:#}");
        let (code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            } => (code, message, details),
            AppError::NotFound { message, code } | AppError::BadRequest { message, code } => {
                (code, message, Vec::new())
            }
            AppError::Store(source) => {
                tracing::error!(error_id = %error_id, error = %cause(&source), "document store failure");
                ("store_error".to_string(), STORE_FAILURE_MESSAGE.to_string(), Vec::new())
            }
            AppError::Upstream(source) => {
                tracing::error!(error_id = %error_id, error = %cause(&source), "news provider failure");
                ("upstream_error".to_string(), UPSTREAM_FAILURE_MESSAGE.to_string(), Vec::new())
            }
        };

        if status.is_client_error() {
            tracing::info!(
                error_id = %error_id,
                error_code = %code,
                status_code = %status.as_u16(),
                "request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                details,
                trace_id: error_id.to_string(),
                timestamp,
            },
        };

        (status, Json(body)).into_response()
    }
}
