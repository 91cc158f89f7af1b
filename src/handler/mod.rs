//! Request handler module
//!
//! Request dispatch and the HTML pages it serves.

pub mod pages;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
