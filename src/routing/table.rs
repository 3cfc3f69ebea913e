//! Route table: path prefix → backend mapping.
//!
//! # Responsibilities
//! - Store routes compiled from configuration
//! - Look up the matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Routes kept sorted by descending prefix length, so the first string
//!   prefix hit is the longest match
//! - Stable sort preserves registration order among equal-length prefixes
//! - Explicit `None` rather than a silent default backend

use crate::config::{ConfigError, RouteConfig};
use crate::proxy::{Forwarder, HttpClient};

/// A single prefix route bound to one backend.
#[derive(Debug, Clone)]
pub struct Route {
    prefix: String,
    forwarder: Forwarder,
}

impl Route {
    /// The configured path prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The forwarder bound to this route's backend.
    pub fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }
}

/// Immutable collection of prefix routes with deterministic match precedence.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Compile a route table from configuration.
    pub fn from_config(routes: &[RouteConfig], client: &HttpClient) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for route in routes {
            table.register(&route.prefix, &route.backend, client)?;
        }
        Ok(table)
    }

    /// Register a route, binding a forwarder to the backend.
    ///
    /// Fails if the prefix is not rooted or the backend is not an absolute
    /// http(s) URL. Registration errors are startup-fatal; the table is never
    /// mutated during request handling.
    pub fn register(
        &mut self,
        prefix: &str,
        backend: &str,
        client: &HttpClient,
    ) -> Result<(), ConfigError> {
        if prefix.is_empty() || !prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix {
                prefix: prefix.to_string(),
            });
        }
        let forwarder = Forwarder::new(backend, client.clone())?;
        self.routes.push(Route {
            prefix: prefix.to_string(),
            forwarder,
        });
        self.routes
            .sort_by_key(|r| std::cmp::Reverse(r.prefix.len()));
        Ok(())
    }

    /// Find the route with the longest prefix matching `path`.
    ///
    /// Returns `None` when no registered prefix matches.
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| path.starts_with(&r.prefix))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::upstream_client;

    fn table(routes: &[(&str, &str)]) -> RouteTable {
        let client = upstream_client();
        let mut table = RouteTable::new();
        for (prefix, backend) in routes {
            table.register(prefix, backend, &client).unwrap();
        }
        table
    }

    #[test]
    fn lookup_matches_prefix() {
        let table = table(&[("/api/v1/users", "http://localhost:3001")]);
        let route = table.lookup("/api/v1/users/42").unwrap();
        assert_eq!(route.prefix(), "/api/v1/users");
        assert!(table.lookup("/unknown/path").is_none());
    }

    #[test]
    fn longest_prefix_wins() {
        let table = table(&[
            ("/api/v1", "http://localhost:3001"),
            ("/api/v1/users", "http://localhost:3002"),
        ]);
        let route = table.lookup("/api/v1/users/5").unwrap();
        assert_eq!(route.prefix(), "/api/v1/users");

        let route = table.lookup("/api/v1/orders").unwrap();
        assert_eq!(route.prefix(), "/api/v1");
    }

    #[test]
    fn precedence_is_by_length_not_registration_order() {
        // Shorter prefix registered first must not shadow the longer one.
        let table = table(&[
            ("/a", "http://localhost:3002"),
            ("/ab", "http://localhost:3001"),
        ]);
        assert_eq!(table.lookup("/ab/x").unwrap().prefix(), "/ab");
        assert_eq!(table.lookup("/ax").unwrap().prefix(), "/a");
    }

    #[test]
    fn register_rejects_unrooted_prefix() {
        let client = upstream_client();
        let mut table = RouteTable::new();
        let err = table
            .register("api", "http://localhost:3001", &client)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPrefix { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn register_rejects_invalid_backend_url() {
        let client = upstream_client();
        let mut table = RouteTable::new();
        let err = table
            .register("/api", "not a url", &client)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackend { .. }));
        assert!(table.is_empty());
    }
}
