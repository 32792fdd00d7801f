// Server module entry point
// Listener creation, connection handling, and the accept loop

pub mod connection;
pub mod listener;
pub mod serve;

// Re-export commonly used entry points
pub use listener::create_listener;
pub use serve::run;
