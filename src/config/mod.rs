// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension).
    ///
    /// The file and environment are both optional; the compiled-in defaults
    /// alone produce a runnable configuration.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PORTAL"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Portal-Server/0.1")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_produce_runnable_config() {
        let config = Config::load_from("no-such-config-file").expect("defaults load");
        assert_eq!(config.server.port, 8000);
        assert!(config.http.enable_cors);
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "combined");
        assert!(config.server.workers.is_none());
        assert!(config.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr_from_defaults() {
        let config = Config::load_from("no-such-config-file").expect("defaults load");
        let addr = config.get_socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8000);
        assert!(addr.ip().is_loopback());
    }
}
