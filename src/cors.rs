//! Permissive cross-origin headers for every function response.

use axum::extract::Request;
use axum::http::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
pub const ALLOW_METHODS: &str = "POST, GET, OPTIONS";

/// The fixed header set attached to every response.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
    ]
}

/// Bare `200 ok` answer for a preflight, `None` for every other method.
pub fn preflight(method: &Method) -> Option<Response> {
    (method == Method::OPTIONS).then(|| (StatusCode::OK, cors_headers(), "ok").into_response())
}

/// Middleware that must wrap every route: short-circuits `OPTIONS` before any
/// handler (and so before any credential lookup) and stamps the headers onto
/// whatever the handler returns, errors included.
pub async fn cors(request: Request, next: Next) -> Response {
    if let Some(response) = preflight(request.method()) {
        return response;
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for (name, value) in cors_headers() {
        headers.insert(name, value);
    }
    response
}
