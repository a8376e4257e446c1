//! The routing table and its build-once gate.
//!
//! # Responsibilities
//! - Hold the endpoint registry until the first request arrives
//! - Build the matching engine's table from it exactly once
//! - Serve lookups from the built table without locking
//!
//! # Design Decisions
//! - Explicit tri-state (`Unbuilt` → `Building` → `Built`) in an atomic;
//!   `Acquire` loads pair with the `Release` store that publishes the table
//! - A mutex serializes the slow path only; readers of a built table never lock
//! - A failed build is final: the outcome is stored and never retried

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use matchit::{Match, MatchError};

use crate::routing::error::RouterError;
use crate::routing::method_set::MethodHandlerSet;
use crate::routing::registry::{EndpointRegistry, RouteInfo};

const UNBUILT: u8 = 0;
const BUILDING: u8 = 1;
const BUILT: u8 = 2;

/// Where a [`LazyRoutingTable`] is in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Unbuilt,
    Building,
    Built,
}

/// The frozen, servable form of an [`EndpointRegistry`].
#[derive(Debug)]
pub struct RoutingTable {
    matcher: matchit::Router<MethodHandlerSet>,
    routes: Vec<RouteInfo>,
}

impl RoutingTable {
    /// Register every endpoint with the matching engine, in registration order.
    pub fn build(registry: EndpointRegistry) -> Result<Self, RouterError> {
        let routes = registry.routes();
        let mut matcher = matchit::Router::new();
        for endpoint in registry {
            matcher
                .insert(endpoint.pattern.as_str(), endpoint.handlers)
                .map_err(|source| RouterError::InvalidPattern {
                    pattern: endpoint.pattern.clone(),
                    source,
                })?;
        }
        Ok(Self { matcher, routes })
    }

    /// Find the endpoint whose pattern matches `path`.
    pub fn lookup<'p>(&self, path: &'p str) -> Result<Match<'_, 'p, &MethodHandlerSet>, MatchError> {
        self.matcher.at(path)
    }

    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }
}

/// A [`RoutingTable`] built on first use from the registry it was given.
#[derive(Debug)]
pub struct LazyRoutingTable {
    state: AtomicU8,
    builds: AtomicUsize,
    pending: Mutex<Option<EndpointRegistry>>,
    table: OnceLock<Result<RoutingTable, RouterError>>,
}

impl LazyRoutingTable {
    pub fn new(registry: EndpointRegistry) -> Self {
        Self {
            state: AtomicU8::new(UNBUILT),
            builds: AtomicUsize::new(0),
            pending: Mutex::new(Some(registry)),
            table: OnceLock::new(),
        }
    }

    pub fn state(&self) -> TableState {
        match self.state.load(Ordering::Acquire) {
            UNBUILT => TableState::Unbuilt,
            BUILDING => TableState::Building,
            _ => TableState::Built,
        }
    }

    /// How many times the table has been built: 0 before the first request, 1 after.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Acquire)
    }

    /// The registry still accepting registrations, `None` once the table is built.
    ///
    /// Taking `&mut self` means no request can be in flight.
    pub fn registry_mut(&mut self) -> Option<&mut EndpointRegistry> {
        self.pending
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_mut()
    }

    /// Routes known to the table, built or not.
    pub fn routes(&self) -> Vec<RouteInfo> {
        if let Some(Ok(table)) = self.table.get() {
            return table.routes().to_vec();
        }
        let pending = self.pending.lock().expect("routing table build lock poisoned");
        pending.as_ref().map(EndpointRegistry::routes).unwrap_or_default()
    }

    /// Return the built table, building it first if this is the first call.
    ///
    /// Concurrent first callers block until the single build finishes and all
    /// observe the same outcome.
    pub fn ensure_built(&self) -> Result<&RoutingTable, &RouterError> {
        if self.state.load(Ordering::Acquire) == BUILT {
            if let Some(outcome) = self.table.get() {
                return outcome.as_ref();
            }
        }
        self.build_slow()
    }

    #[cold]
    fn build_slow(&self) -> Result<&RoutingTable, &RouterError> {
        let mut pending = self.pending.lock().expect("routing table build lock poisoned");

        // Another caller may have finished the build while we waited on the lock.
        let outcome = self.table.get_or_init(|| {
            self.state.store(BUILDING, Ordering::Release);
            let registry = pending.take().unwrap_or_default();
            let endpoints = registry.len();
            let outcome = RoutingTable::build(registry);
            self.builds.fetch_add(1, Ordering::AcqRel);

            match &outcome {
                Ok(table) => {
                    tracing::info!(endpoints, routes = table.routes().len(), "Routing table built");
                    for route in table.routes() {
                        tracing::debug!(method = %route.method, pattern = %route.pattern, "Route");
                    }
                }
                Err(e) => tracing::error!(error = %e, "Failed to build routing table"),
            }
            outcome
        });

        self.state.store(BUILT, Ordering::Release);
        drop(pending);
        outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::boxed;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use std::sync::Arc;

    fn registry(routes: &[(Method, &str)]) -> EndpointRegistry {
        let mut registry = EndpointRegistry::new();
        for (method, pattern) in routes {
            registry
                .register(method.clone(), pattern, boxed(|_req: Request<Body>| async {}))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_builds_on_first_use() {
        let table = LazyRoutingTable::new(registry(&[(Method::GET, "/ping")]));
        assert_eq!(table.state(), TableState::Unbuilt);
        assert_eq!(table.build_count(), 0);

        let built = table.ensure_built().unwrap();
        assert!(built.lookup("/ping").is_ok());
        assert!(built.lookup("/pong").is_err());
        assert_eq!(table.state(), TableState::Built);
        assert_eq!(table.build_count(), 1);

        table.ensure_built().unwrap();
        assert_eq!(table.build_count(), 1);
    }

    #[test]
    fn test_registry_is_closed_after_build() {
        let mut table = LazyRoutingTable::new(registry(&[(Method::GET, "/ping")]));
        assert!(table.registry_mut().is_some());
        table.ensure_built().unwrap();
        assert!(table.registry_mut().is_none());
    }

    #[test]
    fn test_routes_survive_build() {
        let table = LazyRoutingTable::new(registry(&[(Method::GET, "/a"), (Method::PUT, "/a")]));
        let before = table.routes();
        table.ensure_built().unwrap();
        assert_eq!(before, table.routes());
        assert_eq!(before.len(), 2);
    }

    #[test]
    fn test_concurrent_first_use_builds_once() {
        let table = Arc::new(LazyRoutingTable::new(registry(&[(Method::GET, "/ping")])));
        let barrier = Arc::new(std::sync::Barrier::new(16));

        let workers: Vec<_> = (0..16)
            .map(|_| {
                let table = table.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    table.ensure_built().unwrap().lookup("/ping").is_ok()
                })
            })
            .collect();

        for worker in workers {
            assert!(worker.join().unwrap());
        }
        assert_eq!(table.build_count(), 1);
        assert_eq!(table.state(), TableState::Built);
    }
}
