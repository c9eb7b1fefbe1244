use axum::extract::{Form, FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request-body extractor accepting JSON or urlencoded form bodies,
/// dispatched on the `Content-Type` header.
///
/// ```rust,ignore
/// async fn login(JsonOrForm(payload): JsonOrForm<LoginRequest>) -> ... {
///     // payload came from either body encoding
/// }
/// ```
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;
            return Ok(JsonOrForm(value));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(format!("Invalid form body: {e}")))?;
            return Ok(JsonOrForm(value));
        }

        Err(AppError::BadRequest(format!(
            "Unsupported content type: {content_type:?}"
        )))
    }
}
