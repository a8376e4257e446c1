//! Method-aware request router.
//!
//! Register handlers per (method, path pattern), then serve: the routing table
//! is frozen on the first request and every request is dispatched by path,
//! then by method.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Handler, RouteParams, Router, RouterError, RouterService};
