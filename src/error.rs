use std::backtrace::Backtrace;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::response::ApiResponse;

/// Standard error type for request handling.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }
}

/// Error detail for API responses.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Full diagnostic for a server error, stashed in response extensions.
///
/// The response body itself is always sanitized; only the development
/// error middleware ([`dev_errors`]) reads this back out.
#[derive(Debug, Clone)]
pub struct ErrorDiagnostics {
    pub code: &'static str,
    pub message: String,
    pub backtrace: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // 5xx bodies never leak the underlying message; the real detail is
        // logged and stashed for the development middleware.
        let (message, diagnostics) = if status.is_server_error() {
            let detail = self.to_string();
            tracing::error!(code, "{}", detail);
            let diag = ErrorDiagnostics {
                code,
                message: detail,
                backtrace: Backtrace::force_capture().to_string(),
            };
            ("Internal server error".to_string(), Some(diag))
        } else {
            (self.to_string(), None)
        };

        let body: ApiResponse<()> = ApiResponse::error(code, message);
        let mut res = (status, axum::Json(body)).into_response();
        if let Some(diag) = diagnostics {
            res.extensions_mut().insert(diag);
        }
        res
    }
}

/// Fallback for unmatched paths, behind the static file service.
pub async fn not_found() -> AppError {
    AppError::NotFound("The requested resource does not exist".to_string())
}

/// Development error middleware: rewrite sanitized 5xx bodies with the
/// full diagnostic (message plus captured backtrace). Mounted only when
/// the environment is development.
pub async fn dev_errors(req: Request, next: Next) -> Response {
    let res = next.run(req).await;

    let Some(diag) = res.extensions().get::<ErrorDiagnostics>().cloned() else {
        return res;
    };

    let body = serde_json::json!({
        "success": false,
        "error": {
            "code": diag.code,
            "message": diag.message,
            "stack": diag.backtrace,
        },
    });
    let Ok(bytes) = serde_json::to_vec(&body) else {
        return res;
    };

    // Swap only the body: status and headers (the CORS set among them)
    // must survive the rewrite.
    let (mut parts, _) = res.into_parts();
    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
    Response::from_parts(parts, Body::from(bytes))
}
