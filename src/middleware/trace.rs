//! Request trace middleware
//!
//! Logs every request passing through the chain and always passes control
//! onward.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::core::{Middleware, RequestInfo};
use crate::logger;

/// Logs the request line and continues the chain
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestTrace;

impl Middleware for RequestTrace {
    fn handle(&self, req: &RequestInfo<'_>) -> Option<Response<Full<Bytes>>> {
        logger::log_trace(req.method.as_str(), req.path);
        None
    }
}
