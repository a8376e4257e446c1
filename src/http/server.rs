//! HTTP server setup.
//!
//! # Responsibilities
//! - Mount the method router into an axum app
//! - Wire up per-request tracing
//! - Serve on a bound listener until shutdown is signalled

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::routing::{Router, RouterService};

/// HTTP server serving a [`Router`].
pub struct HttpServer {
    service: RouterService,
}

impl HttpServer {
    /// Freeze the router's configuration and prepare to serve it.
    pub fn new(router: Router) -> Self {
        Self {
            service: router.into_service(),
        }
    }

    /// Build the axum app: every request goes to the method router.
    fn build_app(&self) -> axum::Router {
        axum::Router::new()
            .fallback_service(self.service.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.service.router().routes().len(),
            "HTTP server starting"
        );

        let app = self.build_app();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn router(&self) -> &Router {
        self.service.router()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_app_delegates_to_router() {
        let mut router = Router::new();
        router.get("/ping", |_req: Request<Body>| async { "pong" });
        let server = HttpServer::new(router);

        let app = server.build_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(server.router().build_count(), 1);
    }
}
