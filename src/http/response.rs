//! Responses produced by the router itself.
//!
//! # Responsibilities
//! - 404 for paths no endpoint pattern matches
//! - 405 (with `Allow`) for endpoints lacking a handler for the request method
//! - 500 when the routing table could not be built
//!
//! # Design Decisions
//! - 404 carries an empty body, the same default axum uses
//! - Error bodies are short plain text

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

/// Body of every 405 response.
pub const METHOD_NOT_ALLOWED_BODY: &str = "method not allowed";

/// Body of the 500 response sent when the routing table is unavailable.
pub const TABLE_UNAVAILABLE_BODY: &str = "routing table unavailable";

/// No endpoint pattern matched the request path.
pub fn not_found() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// The path matched, the method did not.
///
/// `allow` is the comma-separated list of methods the endpoint does serve.
pub fn method_not_allowed(allow: Option<HeaderValue>) -> Response {
    let mut response = plain_text(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY);
    if let Some(allow) = allow {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}

/// The routing table failed to build and no request can be routed.
pub fn table_unavailable() -> Response {
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, TABLE_UNAVAILABLE_BODY)
}

fn plain_text(status: StatusCode, body: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}
