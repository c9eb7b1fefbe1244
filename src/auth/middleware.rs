//! Session-loading middleware.
//!
//! Reads the signed session cookie, loads the store record, and attaches a
//! [`CurrentSession`] to request extensions. Absent, tampered, or expired
//! cookies let the request proceed without a session; only login creates one.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::NaiveDateTime;

use crate::auth::{cookie, session as session_store};
use crate::controllers::AppState;

/// The session attached to a request, when a valid cookie accompanied it.
#[derive(Clone, Debug)]
pub struct CurrentSession {
    pub id: String,
    pub username: String,
    pub expires_at: NaiveDateTime,
}

/// Middleware that resolves the session cookie into a [`CurrentSession`]
/// request extension.
///
/// The cookie value is copied out before the store lookup; the request
/// body must not be borrowed across the await.
pub async fn load_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let raw = cookie_value(req.headers(), &state.config.key);
    if let Some(raw) = raw {
        if let Some(current) = resolve_session(&state, &raw).await {
            req.extensions_mut().insert(current);
        }
    }
    next.run(req).await
}

async fn resolve_session(state: &AppState, raw: &str) -> Option<CurrentSession> {
    let session_id = cookie::verify(raw, &state.config.secret)?;

    let record = match session_store::load_session(&state.db, session_id).await {
        Ok(record) => record?,
        Err(err) => {
            tracing::debug!("session lookup failed: {err}");
            return None;
        }
    };

    Some(CurrentSession {
        id: record.id,
        username: record.username,
        expires_at: record.expires_at,
    })
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
