//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, trace layer, graceful shutdown)
//!     → routing::RouterService (fallback service)
//!     → response.rs (404 / 405 / 500 produced by the router itself)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
