//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Accept endpoint registrations while the router is being configured
//! - Freeze them into a routing table on the first request
//! - Match each request path, then dispatch on its method
//!
//! # Design Decisions
//! - Registration takes `&mut self`, serving takes `&self`: once a router is
//!   shared for serving it can no longer be reconfigured
//! - Duplicate registrations panic from the sugar methods, like overlapping
//!   method routes do in axum; `try_route` returns the error instead
//! - Explicit 404 / 405 rather than silent defaults

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::http::response;
use crate::routing::error::RouterError;
use crate::routing::handler::{boxed, Handler};
use crate::routing::params::RouteParams;
use crate::routing::registry::{EndpointRegistry, RouteInfo};
use crate::routing::table::{LazyRoutingTable, TableState};

/// Maps (method, path pattern) pairs to handlers.
///
/// ```rust,no_run
/// use axum::body::Body;
/// use axum::http::Request;
/// use method_router::Router;
///
/// let mut router = Router::new();
/// router.get("/ping", |_req: Request<Body>| async { "pong" });
/// router.post("/items", |_req: Request<Body>| async { "created" });
/// ```
#[derive(Debug)]
pub struct Router {
    table: LazyRoutingTable,
}

impl Router {
    pub fn new() -> Self {
        Self {
            table: LazyRoutingTable::new(EndpointRegistry::new()),
        }
    }

    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn patch<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::PATCH, pattern, handler)
    }

    pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Register `handler` for an arbitrary method.
    ///
    /// # Panics
    ///
    /// Panics if `method` is already registered for `pattern`, if the pattern
    /// is rejected by the matcher, or if the router has already served a
    /// request. A misconfigured router must not start serving.
    pub fn route<H: Handler>(&mut self, method: Method, pattern: &str, handler: H) -> &mut Self {
        if let Err(e) = self.try_route(method, pattern, handler) {
            tracing::error!(error = %e, "Invalid route registration");
            panic!("{e}");
        }
        self
    }

    /// Fallible form of [`Router::route`].
    pub fn try_route<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouterError> {
        let Some(registry) = self.table.registry_mut() else {
            return Err(RouterError::AlreadyBuilt {
                method,
                pattern: pattern.to_string(),
            });
        };
        registry.register(method, pattern, boxed(handler))?;
        Ok(self)
    }

    /// Every registered (method, pattern) pair, patterns in registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.table.routes()
    }

    pub fn table_state(&self) -> TableState {
        self.table.state()
    }

    /// Number of routing table builds so far (0 or 1).
    pub fn build_count(&self) -> usize {
        self.table.build_count()
    }

    /// Route one request to its handler.
    ///
    /// The first call builds the routing table.
    pub async fn serve(&self, mut request: Request<Body>) -> Response {
        let table = match self.table.ensure_built() {
            Ok(table) => table,
            Err(_) => return response::table_unavailable(),
        };

        let path = request.uri().path().to_string();
        let dispatch = match table.lookup(&path) {
            Ok(matched) => {
                if !matched.params.is_empty() {
                    request
                        .extensions_mut()
                        .insert(RouteParams::from(&matched.params));
                }
                matched.value.dispatch(request)
            }
            Err(_) => {
                tracing::debug!(method = %request.method(), path = %path, "No route matched");
                return response::not_found();
            }
        };
        dispatch.await
    }

    /// Share the router as a cloneable [`tower::Service`].
    pub fn into_service(self) -> RouterService {
        RouterService::new(Arc::new(self))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Router`] behind an `Arc`, usable wherever a `tower::Service` is expected
/// (for instance as an axum fallback service).
#[derive(Debug, Clone)]
pub struct RouterService {
    router: Arc<Router>,
}

impl RouterService {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

impl tower::Service<Request<Body>> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let router = self.router.clone();
        Box::pin(async move { Ok(router.serve(request).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_sugar_registers_fixed_methods() {
        let mut router = Router::new();
        router
            .get("/r", |_req: Request<Body>| async {})
            .post("/r", |_req: Request<Body>| async {})
            .put("/r", |_req: Request<Body>| async {})
            .patch("/r", |_req: Request<Body>| async {})
            .delete("/r", |_req: Request<Body>| async {});

        let methods: Vec<_> = router.routes().into_iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            [Method::DELETE, Method::GET, Method::PATCH, Method::POST, Method::PUT]
        );
    }

    #[test]
    #[should_panic(expected = "method GET already registered for pattern /x")]
    fn test_duplicate_registration_panics() {
        let mut router = Router::new();
        router.get("/x", |_req: Request<Body>| async {});
        router.get("/x", |_req: Request<Body>| async {});
    }

    #[test]
    fn test_try_route_reports_duplicate() {
        let mut router = Router::new();
        router.try_route(Method::GET, "/x", |_req: Request<Body>| async {}).unwrap();
        let err = router
            .try_route(Method::GET, "/x", |_req: Request<Body>| async {})
            .unwrap_err();
        assert!(matches!(err, RouterError::DuplicateMethod { .. }));
    }

    #[tokio::test]
    async fn test_registration_after_serving_is_rejected() {
        let mut router = Router::new();
        router.get("/ping", |_req: Request<Body>| async { "pong" });
        router.serve(request(Method::GET, "/ping")).await;

        let err = router
            .try_route(Method::POST, "/ping", |_req: Request<Body>| async {})
            .unwrap_err();
        assert!(matches!(err, RouterError::AlreadyBuilt { .. }));
    }

    #[tokio::test]
    async fn test_route_params_reach_handler() {
        let mut router = Router::new();
        router.get("/items/{id}", |req: Request<Body>| async move {
            req.extensions()
                .get::<RouteParams>()
                .and_then(|p| p.get("id"))
                .unwrap_or("none")
                .to_string()
        });

        let response = router.serve(request(Method::GET, "/items/42")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"42");
    }

    #[tokio::test]
    async fn test_custom_method() {
        let mut router = Router::new();
        let purge = Method::from_bytes(b"PURGE").unwrap();
        router.route(purge.clone(), "/cache", |_req: Request<Body>| async { StatusCode::ACCEPTED });

        let response = router.serve(request(purge, "/cache")).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = router.serve(request(Method::GET, "/cache")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
