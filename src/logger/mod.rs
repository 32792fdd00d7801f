//! Logger module
//!
//! Server lifecycle, warning/error, and access logging on top of the
//! global writer. Every helper falls back to plain stdout/stderr until
//! `init` has run, so early startup failures stay visible.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize logging from config. Call once, before the runtime starts.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

fn error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

fn access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

/// Startup banner, written once the listener is bound
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info("======================================");
    info("File listing server started");
    info(&format!("Listening on: http://{addr}"));
    info(&format!("Serving listing from: {}", config.listing.data_file));
    info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        info(&format!("Error log: {path}"));
    }
    info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    error(&format!("[WARN] {message}"));
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        info(&format!("[Headers] Count: {count}"));
    }
}

/// One rendered access log line per finished request
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    access(&entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    info("\n[Shutdown] Signal received, stopping accept loop");
    if active_connections > 0 {
        info(&format!(
            "[Shutdown] {active_connections} connection(s) still in flight"
        ));
    }
}

pub fn log_shutdown_complete() {
    info("[Shutdown] All connections closed, exiting");
}
