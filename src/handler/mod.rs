//! Request handler module
//!
//! Request routing dispatch plus the handlers behind each route: the
//! JSON listing endpoint and the embedded browser page.

pub mod data;
pub mod page;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
