//! HTTP protocol layer module
//!
//! HTTP-level building blocks (response builders, cache validation),
//! decoupled from specific business logic.

pub mod cache;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_cached_response, build_error_response, build_health_response, build_html_response,
    build_json_response, build_options_response,
};
