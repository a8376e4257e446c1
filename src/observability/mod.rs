//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured events through `tracing` in every subsystem
//! - One subscriber installed by the binary; the library only emits
//! - Request spans come from `tower_http::trace::TraceLayer` in the server

pub mod logging;

pub use logging::init_logging;
