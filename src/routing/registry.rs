//! Endpoint registration.
//!
//! # Responsibilities
//! - Collect (pattern, method, handler) registrations in order
//! - Reject a second handler for the same method on the same pattern
//! - Reject patterns the matching engine would refuse, at registration time
//!
//! # Design Decisions
//! - Pattern lookup goes through a pattern → position index
//! - Registration order is kept; it only affects iteration, never dispatch

use std::collections::HashMap;

use axum::http::Method;

use crate::routing::error::RouterError;
use crate::routing::handler::BoxedHandler;
use crate::routing::method_set::MethodHandlerSet;

/// A path pattern together with its per-method handlers.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub pattern: String,
    pub handlers: MethodHandlerSet,
}

/// A registered (method, pattern) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: Method,
    pub pattern: String,
}

/// Endpoints accumulated while the router is being configured.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
    index: HashMap<String, usize>,
    // Mirrors every accepted pattern so syntax errors and conflicts surface
    // here instead of at build time.
    validator: matchit::Router<usize>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` requests matching `pattern`.
    ///
    /// The first registration for a pattern creates its endpoint; later ones
    /// add methods to it. Registering a method twice for one pattern is an
    /// error and leaves the registry untouched.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        handler: BoxedHandler,
    ) -> Result<(), RouterError> {
        let position = match self.index.get(pattern) {
            Some(&position) => position,
            None => self.add_endpoint(pattern)?,
        };

        let endpoint = &mut self.endpoints[position];
        if endpoint.handlers.insert(method.clone(), handler).is_err() {
            return Err(RouterError::DuplicateMethod {
                method,
                pattern: pattern.to_string(),
            });
        }

        tracing::debug!(method = %method, pattern = %pattern, "Endpoint registered");
        Ok(())
    }

    fn add_endpoint(&mut self, pattern: &str) -> Result<usize, RouterError> {
        let position = self.endpoints.len();
        self.validator
            .insert(pattern, position)
            .map_err(|source| RouterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        self.endpoints.push(Endpoint {
            pattern: pattern.to_string(),
            handlers: MethodHandlerSet::new(),
        });
        self.index.insert(pattern.to_string(), position);
        Ok(position)
    }

    pub fn get(&self, pattern: &str) -> Option<&Endpoint> {
        self.index.get(pattern).map(|&i| &self.endpoints[i])
    }

    /// Endpoints in registration order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    /// Every (method, pattern) pair, patterns in registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.endpoints
            .iter()
            .flat_map(|endpoint| {
                endpoint.handlers.methods().into_iter().map(|method| RouteInfo {
                    method,
                    pattern: endpoint.pattern.clone(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl IntoIterator for EndpointRegistry {
    type Item = Endpoint;
    type IntoIter = std::vec::IntoIter<Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.into_iter()
    }
}
