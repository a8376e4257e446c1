//! Per-endpoint dispatch on the request method.

use std::collections::HashMap;
use std::fmt;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use futures_util::future::{self, BoxFuture, FutureExt};

use crate::http::response;
use crate::routing::handler::BoxedHandler;

/// The handlers registered for one pattern, keyed by HTTP method.
///
/// Method comparison is exact and case-sensitive: `GET` and `get` are
/// different methods.
#[derive(Clone, Default)]
pub struct MethodHandlerSet {
    handlers: HashMap<Method, BoxedHandler>,
}

impl MethodHandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.handlers.contains_key(method)
    }

    /// Insert a handler for `method`.
    ///
    /// Returns the handler back if `method` is already taken; an existing
    /// entry is never replaced.
    pub fn insert(&mut self, method: Method, handler: BoxedHandler) -> Result<(), BoxedHandler> {
        if self.handlers.contains_key(&method) {
            return Err(handler);
        }
        self.handlers.insert(method, handler);
        Ok(())
    }

    /// Registered methods, sorted by name.
    pub fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The `Allow` header value for a 405 response, `None` if nothing is registered.
    pub fn allow_header_value(&self) -> Option<HeaderValue> {
        if self.handlers.is_empty() {
            return None;
        }
        let allow = self
            .methods()
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",");
        HeaderValue::from_str(&allow).ok()
    }

    /// Hand the request to the handler registered for its method.
    ///
    /// Without one, a 405 is produced and no handler runs.
    pub fn dispatch(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        match self.handlers.get(request.method()) {
            Some(handler) => handler.call(request),
            None => {
                tracing::debug!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "Method not allowed"
                );
                future::ready(response::method_not_allowed(self.allow_header_value())).boxed()
            }
        }
    }
}

impl fmt::Debug for MethodHandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHandlerSet")
            .field("methods", &self.methods())
            .finish()
    }
}
