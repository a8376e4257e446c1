//! Routing configuration errors.

use axum::http::Method;
use thiserror::Error;

/// A mistake in how endpoints were registered.
///
/// These are programming errors: they are reported while the router is being
/// configured, before any request is served.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("method {method} already registered for pattern {pattern}")]
    DuplicateMethod { method: Method, pattern: String },

    #[error("invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("cannot register {method} {pattern}: the routing table has already been built")]
    AlreadyBuilt { method: Method, pattern: String },
}
