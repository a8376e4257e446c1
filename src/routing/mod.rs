//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration (single-threaded, before serving):
//!     router.get / post / put / patch / delete
//!     → registry.rs (endpoint per pattern, method set per endpoint)
//!
//! First request:
//!     → table.rs (build-once gate: registry → matchit table)
//!
//! Every request (path, method):
//!     → table.rs (engine lookup by path)  → 404 on no match
//!     → method_set.rs (dispatch by method) → 405 on no handler
//!     → handler.rs (user handler produces the response)
//! ```
//!
//! # Design Decisions
//! - Pattern syntax and precedence belong to `matchit`
//! - Table built once, immutable afterwards (read without locks)
//! - Configuration errors are caught at registration, never at serve time

pub mod error;
pub mod handler;
pub mod method_set;
pub mod params;
pub mod registry;
pub mod router;
pub mod table;

pub use error::RouterError;
pub use handler::{BoxedHandler, Handler};
pub use method_set::MethodHandlerSet;
pub use params::RouteParams;
pub use registry::{Endpoint, EndpointRegistry, RouteInfo};
pub use router::{Router, RouterService};
pub use table::{LazyRoutingTable, RoutingTable, TableState};
