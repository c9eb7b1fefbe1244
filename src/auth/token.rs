//! Shared-token validation collaborator.
//!
//! Present but not mounted on the active request path; kept for
//! deployments that front the API with a shared `x-auth-token`.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;

pub const TOKEN_HEADER: &str = "x-auth-token";

/// Predicate over the `x-auth-token` header.
pub fn is_valid_token(headers: &HeaderMap) -> bool {
    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|token| !token.trim().is_empty())
}

/// Middleware form of [`is_valid_token`]: reject the request when the
/// header is missing or empty.
pub async fn require_valid_token(req: Request, next: Next) -> Result<Response, AppError> {
    if !is_valid_token(req.headers()) {
        return Err(AppError::Unauthorized(
            "Missing or empty x-auth-token header".to_string(),
        ));
    }
    Ok(next.run(req).await)
}
