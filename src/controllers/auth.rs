use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::auth::{cookie, session as session_store, CurrentSession};
use crate::error::AppError;
use crate::extractors::JsonOrForm;
use crate::response::ApiResponse;
use crate::routing::Routes;

use super::AppState;

// ── Request / Response types ──

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub username: String,
    pub expires_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the auth route group, mounted under `/api`.
pub fn routes() -> Routes {
    Routes::new("/api")
        .post("/login", login)
        .post("/logout", logout)
        .get("/session", current_session)
}

/// `POST /api/login` — create a session record and set the signed cookie.
///
/// Credential verification lives behind an external collaborator; this
/// handler only establishes the session.
async fn login(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "username and password must not be empty".to_string(),
        ));
    }

    let record = session_store::create_session(&state.db, payload.username.trim()).await?;

    let value = cookie::sign(&record.id, &state.config.secret);
    let set_cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        state.config.key, value
    );

    Ok((
        [(SET_COOKIE, set_cookie)],
        Json(ApiResponse::success(SessionResponse {
            id: record.id,
            username: record.username,
            expires_at: record.expires_at,
        })),
    ))
}

/// `POST /api/logout` — destroy the current session and clear the cookie.
/// Succeeds even without a session.
async fn logout(
    State(state): State<AppState>,
    current: Option<Extension<CurrentSession>>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(Extension(session)) = current {
        session_store::destroy_session(&state.db, &session.id).await?;
    }

    let clear_cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", state.config.key);

    Ok((
        [(SET_COOKIE, clear_cookie)],
        Json(ApiResponse::success(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// `GET /api/session` — the current session, or 401 without one.
async fn current_session(
    current: Option<Extension<CurrentSession>>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let Some(Extension(session)) = current else {
        return Err(AppError::Unauthorized("No active session".to_string()));
    };

    Ok(Json(ApiResponse::success(SessionResponse {
        id: session.id,
        username: session.username,
        expires_at: session.expires_at,
    })))
}
