// Application state module
// Per-process shared state handed to every connection

use super::types::Config;

/// Shared application state, built once at startup and passed around
/// behind an `Arc`. The config snapshot is immutable for the process
/// lifetime, so request handlers read it without locks.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }
}
