//! Middleware module
//!
//! Ordered prefix-matched handler chain and the handlers shipped with the
//! server.

mod core;
mod trace;
mod users;

pub use core::{Chain, Middleware, RequestInfo};
pub use trace::RequestTrace;
pub use users::UsersPage;
