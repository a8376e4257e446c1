//! The handler capability routed to by the [`Router`](super::Router).
//!
//! Any `Fn(Request<Body>) -> impl Future<Output = impl IntoResponse>` is a
//! handler, so plain `async fn`s and closures can be registered directly.

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

/// A unit of behavior that turns one request into one response.
///
/// Errors inside a handler are the handler's business: whatever response it
/// produces is sent back to the client as-is.
pub trait Handler: Send + Sync + 'static {
    /// Handle a single request.
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        let fut = (self)(request);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// A type-erased, shareable handler.
pub type BoxedHandler = Arc<dyn Handler>;

/// Erase the concrete type of a handler.
pub fn boxed<H: Handler>(handler: H) -> BoxedHandler {
    Arc::new(handler)
}
