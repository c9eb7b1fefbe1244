//! Fixed-header CORS middleware.
//!
//! The contract is a verbatim header set: wildcard origin together with
//! `Access-Control-Allow-Credentials: true`. `tower_http::cors::CorsLayer`
//! refuses that combination, so the headers are written directly.

use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const ALLOW_METHODS: &str = "GET,PATCH,PUT,POST,DELETE";
const ALLOW_HEADERS: &str =
    "Accept, Authorization, x-auth-token, Content-Type, X-Requested-With, Range";

/// Apply the CORS header set to every response; `OPTIONS` requests
/// short-circuit with `200` and no body.
pub async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut res = StatusCode::OK.into_response();
        apply_headers(res.headers_mut());
        return res;
    }

    let mut res = next.run(req).await;
    apply_headers(res.headers_mut());
    res
}

fn apply_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("Content-Length"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}
