//! Middleware chain module
//!
//! An ordered list of (path prefix, handler) pairs evaluated in registration
//! order. Each handler either finalizes the response or passes control
//! onward to the next matching entry.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

/// Read-only view of the request exposed to chain handlers
pub struct RequestInfo<'a> {
    pub method: &'a Method,
    pub path: &'a str,
}

/// A handler in the chain.
///
/// Returning `Some` finalizes the response and ends the walk; returning
/// `None` passes control to the next matching entry.
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &RequestInfo<'_>) -> Option<Response<Full<Bytes>>>;
}

struct ChainEntry {
    prefix: String,
    middleware: Box<dyn Middleware>,
}

/// Ordered middleware chain matched on path prefixes
#[derive(Default)]
pub struct Chain {
    entries: Vec<ChainEntry>,
}

impl Chain {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a handler for `prefix`.
    ///
    /// Entries run in mount order; the matcher does not reorder them, so
    /// mount longer prefixes before shorter finalizing ones to take
    /// precedence.
    pub fn mount(&mut self, prefix: impl Into<String>, middleware: impl Middleware + 'static) {
        self.entries.push(ChainEntry {
            prefix: prefix.into(),
            middleware: Box::new(middleware),
        });
    }

    /// Walk matching entries in mount order and return the first finalized
    /// response, or `None` when every matching handler passed control on.
    pub fn dispatch(&self, req: &RequestInfo<'_>) -> Option<Response<Full<Bytes>>> {
        self.entries
            .iter()
            .filter(|entry| path_matches(&entry.prefix, req.path))
            .find_map(|entry| entry.middleware.handle(req))
    }

    /// Number of mounted handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A handler mounted at `prefix` runs for any path beginning with it
fn path_matches(prefix: &str, path: &str) -> bool {
    path.starts_with(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Finalize(u16);

    impl Middleware for Finalize {
        fn handle(&self, _req: &RequestInfo<'_>) -> Option<Response<Full<Bytes>>> {
            Some(
                Response::builder()
                    .status(self.0)
                    .body(Full::new(Bytes::new()))
                    .unwrap(),
            )
        }
    }

    struct Continue(Arc<AtomicUsize>);

    impl Middleware for Continue {
        fn handle(&self, _req: &RequestInfo<'_>) -> Option<Response<Full<Bytes>>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    fn info(path: &str) -> RequestInfo<'_> {
        RequestInfo {
            method: &Method::GET,
            path,
        }
    }

    #[test]
    fn test_prefix_matches_subpaths() {
        let mut chain = Chain::new();
        chain.mount("/users", Finalize(200));

        assert!(chain.dispatch(&info("/users")).is_some());
        assert!(chain.dispatch(&info("/users/123")).is_some());
        assert!(chain.dispatch(&info("/account")).is_none());
    }

    #[test]
    fn test_registration_order_first_finalizer_wins() {
        let mut chain = Chain::new();
        chain.mount("/", Finalize(201));
        chain.mount("/", Finalize(202));

        let resp = chain.dispatch(&info("/anything")).unwrap();
        assert_eq!(resp.status(), 201);
    }

    #[test]
    fn test_continue_passes_control_onward() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut chain = Chain::new();
        chain.mount("/", Continue(Arc::clone(&counter)));
        chain.mount("/users", Finalize(200));

        let resp = chain.dispatch(&info("/users/1"));
        assert!(resp.is_some());
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        let resp = chain.dispatch(&info("/other"));
        assert!(resp.is_none());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_longer_prefix_mounted_first_takes_precedence() {
        let mut chain = Chain::new();
        chain.mount("/users/admin", Finalize(201));
        chain.mount("/users", Finalize(202));

        assert_eq!(chain.dispatch(&info("/users/admin")).unwrap().status(), 201);
        assert_eq!(chain.dispatch(&info("/users/123")).unwrap().status(), 202);
    }

    #[test]
    fn test_empty_chain_returns_none() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert!(chain.dispatch(&info("/")).is_none());
    }
}
