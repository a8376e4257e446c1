//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use method_router::Router;

/// Build a request with an empty body.
#[allow(dead_code)]
pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as a string.
#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Serve one request and return (status, body).
pub async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let response = router.serve(request(method, uri)).await;
    let status = response.status();
    (status, body_string(response).await)
}

/// A handler that answers with a fixed status and body and counts its calls.
#[allow(dead_code)]
pub fn counting_handler(
    status: StatusCode,
    body: &'static str,
) -> (
    Arc<AtomicUsize>,
    impl Fn(Request<Body>) -> std::future::Ready<(StatusCode, &'static str)> + Send + Sync + 'static,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let handler = move |_req: Request<Body>| {
        counter.fetch_add(1, Ordering::SeqCst);
        std::future::ready((status, body))
    };
    (calls, handler)
}
