// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, IdentityConfig, LoggingConfig, PerformanceConfig, ServerConfig, StatusPageConfig,
    StorageConfig,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix for environment overrides, e.g. `PORTAL_SERVER__PORT=9000`
const ENV_PREFIX: &str = "PORTAL";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Precedence, lowest first: built-in defaults, the file, `PORTAL_*` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_layers(config_path, None)
    }

    /// Same layering as [`Config::load_from`], reading overrides from `env` instead of
    /// the process environment when it is given
    fn load_layers(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    let identity = IdentityConfig::default();
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("identity.email_header", identity.email_header)?
        .set_default("identity.country_header", identity.country_header)?
        .set_default("status_page.escape_html", false)?
        .set_default("storage.backend", "filesystem")?
        .set_default("storage.root", "flags")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/portal").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.workers.is_none());
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert_eq!(cfg.identity, IdentityConfig::default());
        assert!(!cfg.status_page.escape_html);
        assert_eq!(cfg.storage, StorageConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090
workers = 2

[identity]
email_header = "X-User-Email"
country_header = "X-Country"

[status_page]
escape_html = true

[storage]
backend = "filesystem"
root = "/srv/flags"
"#
        )
        .unwrap();

        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.identity.email_header, "X-User-Email");
        assert_eq!(cfg.identity.country_header, "X-Country");
        assert!(cfg.status_page.escape_html);
        assert_eq!(
            cfg.storage,
            StorageConfig::Filesystem {
                root: "/srv/flags".to_string()
            }
        );
        // Untouched sections keep their defaults
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        let env: config::Map<String, String> = [
            ("PORTAL_SERVER__PORT", "9000"),
            ("PORTAL_STORAGE__ROOT", "/srv/flags"),
            ("PORTAL_STATUS_PAGE__ESCAPE_HTML", "true"),
            ("OTHER_SERVER__PORT", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg = Config::load_layers("does-not-exist/portal", Some(env)).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(
            cfg.storage,
            StorageConfig::Filesystem {
                root: "/srv/flags".to_string()
            }
        );
        assert!(cfg.status_page.escape_html);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn test_env_beats_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 9090\nhost = \"0.0.0.0\"").unwrap();
        let env = config::Map::from([("PORTAL_SERVER__PORT".to_string(), "9191".to_string())]);

        let cfg = Config::load_layers(file.path().to_str().unwrap(), Some(env)).unwrap();
        assert_eq!(cfg.server.port, 9191);
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("does-not-exist/portal").unwrap();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }
}
