//! Configuration module
//!
//! Layered configuration: an optional `config.*` file, overridden by
//! `SERVER_`-prefixed environment variables, on top of built-in defaults.
//! The listen address is carried as a single opaque string; it is parsed
//! only at bind time.

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. `127.0.0.1:8080`
    pub addr: String,
    /// Tokio worker threads; defaults to the CPU count when unset
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Info sink file; stdout when unset
    pub info_log_file: Option<String>,
    /// Error sink file; stderr when unset
    pub error_log_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    /// Subtree pattern the file handler is mounted at
    pub prefix: String,
    /// Directory the files are served from
    pub dir: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.addr", "127.0.0.1:8080")?
            .set_default("static.prefix", "/static/")?
            .set_default("static.dir", "static")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .addr
            .parse()
            .map_err(|e| format!("Invalid listen address '{}': {e}", self.server.addr))
    }
}
