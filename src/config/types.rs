// Configuration types module
// Typed views over the layered configuration, one struct per table

use serde::Deserialize;

/// Top-level configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub listing: ListingConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// `[server]` — bind address and runtime sizing
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; tokio picks when unset
    pub workers: Option<usize>,
}

/// `[listing]` — the backing store
#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    /// Path to the semicolon-delimited data file
    pub data_file: String,
}

/// `[logging]` — log destinations and the access log format
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// combined, common, json, or a `$variable` custom pattern
    #[serde(default = "defaults::access_log_format")]
    pub access_log_format: String,
    /// Append target for access lines; stdout when unset
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Append target for error lines; stderr when unset
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// `[performance]` — connection timeouts and limits, in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// `[http]` — protocol-level switches
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// `[routes]` — paths the router special-cases
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Paths served with the bundled favicon
    #[serde(default = "defaults::favicon_paths")]
    pub favicon_paths: Vec<String>,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            favicon_paths: defaults::favicon_paths(),
            health: HealthConfig::default(),
        }
    }
}

/// `[routes.health]` — liveness/readiness probe endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    #[serde(default = "defaults::health_enabled")]
    pub enabled: bool,
    #[serde(default = "defaults::liveness_path")]
    pub liveness_path: String,
    #[serde(default = "defaults::readiness_path")]
    pub readiness_path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::health_enabled(),
            liveness_path: defaults::liveness_path(),
            readiness_path: defaults::readiness_path(),
        }
    }
}

/// Serde default providers for the optional tables above
mod defaults {
    pub fn access_log_format() -> String {
        "combined".to_string()
    }

    pub fn favicon_paths() -> Vec<String> {
        vec!["/favicon.ico".to_string(), "/favicon.svg".to_string()]
    }

    pub const fn health_enabled() -> bool {
        true
    }

    pub fn liveness_path() -> String {
        "/healthz".to_string()
    }

    pub fn readiness_path() -> String {
        "/readyz".to_string()
    }
}
