//! API error type and its mapping to HTTP responses.
//!
//! ## Taxonomy
//! ```text
//! Validation   → 400  (missing/malformed fields, unknown period)
//! Unauthorized → 401  (missing bearer token)
//! NotFound     → 404  (unknown RFID, unknown id)
//! Conflict     → 409  (buyer name/RFID uniqueness)
//! Storage      → 500  (unexpected persistence failure; detail is logged,
//!                      never leaked to the client)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use bookpos_core::ValidationError;
use bookpos_db::DbError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(v) => ApiError::Validation(v),
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::UniqueViolation { .. } | DbError::RfidConflict { .. } => {
                ApiError::Conflict(err.to_string())
            }
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Storage(detail) => {
                // Log the internal detail; the client gets a generic message.
                error!(detail = %detail, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "internal storage failure".to_string(),
                )
            }
        };

        json_error(status, code, message)
    }
}

/// Builds a status-coded JSON error response.
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Result alias for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;
