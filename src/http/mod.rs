//! HTTP protocol layer module
//!
//! Protocol-level helpers decoupled from specific business logic: form body
//! decoding and response builders.

pub mod form;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_405_response, build_413_response, build_500_response,
    build_options_response, build_redirect_response,
};
