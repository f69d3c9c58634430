//! HTTP listener settings read with the `config` crate
//!
//! Each service reads `<PREFIX>_HOST`, `<PREFIX>_PORT` and
//! `<PREFIX>_REQUEST_TIMEOUT_SECS` and `<PREFIX>_CORS_ALLOWED_ORIGINS`,
//! falling back to its own defaults.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use crate::layers::DEFAULT_ALLOWED_ORIGIN;

/// Listener settings for one service binary
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Per-request deadline; the handler future is dropped when it expires
    pub request_timeout_secs: u64,
    /// Comma separated browser origins allowed by CORS
    pub cors_allowed_origins: String,
}

impl ServerSettings {
    pub fn from_env(prefix: &str, default_port: u16) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", i64::from(default_port))?
            .set_default("request_timeout_secs", 30)?
            .set_default("cors_allowed_origins", DEFAULT_ALLOWED_ORIGIN)?
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}
