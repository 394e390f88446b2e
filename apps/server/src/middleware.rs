//! Bearer-token presence gate.
//!
//! This is a stub by design: it checks that an `Authorization: Bearer <...>`
//! header is present and non-empty, nothing more. Token verification is out
//! of scope for this service.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;

/// Rejects requests without a non-empty bearer token.
pub async fn require_bearer(request: Request, next: Next) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if !token.trim().is_empty() => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}
