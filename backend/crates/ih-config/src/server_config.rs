use crate::bounds::check_range;
use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_MAX_CONNECTIONS, MAX_REQUEST_TIMEOUT_SECS,
    MIN_MAX_CONNECTIONS, MIN_PORT, MIN_REQUEST_TIMEOUT_SECS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum concurrent connections
    pub max_connections: usize,
    /// Per-request timeout for the REST API
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 lets the OS pick
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::config(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        check_range(
            "server.max_connections",
            self.max_connections,
            MIN_MAX_CONNECTIONS,
            MAX_MAX_CONNECTIONS,
        )?;
        check_range(
            "server.request_timeout_secs",
            self.request_timeout_secs,
            MIN_REQUEST_TIMEOUT_SECS,
            MAX_REQUEST_TIMEOUT_SECS,
        )
    }
}
