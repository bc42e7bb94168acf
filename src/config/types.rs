// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub identity: IdentityConfig,
    pub status_page: StatusPageConfig,
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Names of the headers set by the upstream access-control layer
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Header carrying the authenticated user's email
    pub email_header: String,
    /// Header carrying the client's 2-letter country code
    pub country_header: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            email_header: "Cf-Access-Authenticated-User-Email".to_string(),
            country_header: "Cf-IPCountry".to_string(),
        }
    }
}

/// Status page rendering options
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusPageConfig {
    /// HTML-escape header values before embedding them in the page.
    /// Off by default: values are embedded verbatim.
    #[serde(default)]
    pub escape_html: bool,
}

/// Object storage backend
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Objects are files directly under `root`, named by key
    Filesystem { root: String },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Filesystem {
            root: "flags".to_string(),
        }
    }
}
