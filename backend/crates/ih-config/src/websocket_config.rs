use crate::bounds::check_range;
use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10_000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

pub const MIN_HEARTBEAT_INTERVAL_SECS: u64 = 5;
pub const MAX_HEARTBEAT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_HEARTBEAT_INTERVAL_SECS: u64 = 30;

pub const MIN_HEARTBEAT_TIMEOUT_SECS: u64 = 10;
pub const MAX_HEARTBEAT_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_HEARTBEAT_TIMEOUT_SECS: u64 = 60;

/// Live-read WebSocket sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Outbound messages queued per session before it is considered stuck
    pub send_buffer_size: usize,
    pub heartbeat_interval_secs: u64,
    /// Close the session when no pong arrives within this window
    pub heartbeat_timeout_secs: u64,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL_SECS,
            heartbeat_timeout_secs: DEFAULT_HEARTBEAT_TIMEOUT_SECS,
        }
    }
}

impl WebSocketConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        check_range(
            "websocket.send_buffer_size",
            self.send_buffer_size,
            MIN_SEND_BUFFER_SIZE,
            MAX_SEND_BUFFER_SIZE,
        )?;
        check_range(
            "websocket.heartbeat_interval_secs",
            self.heartbeat_interval_secs,
            MIN_HEARTBEAT_INTERVAL_SECS,
            MAX_HEARTBEAT_INTERVAL_SECS,
        )?;
        check_range(
            "websocket.heartbeat_timeout_secs",
            self.heartbeat_timeout_secs,
            MIN_HEARTBEAT_TIMEOUT_SECS,
            MAX_HEARTBEAT_TIMEOUT_SECS,
        )?;

        if self.heartbeat_timeout_secs <= self.heartbeat_interval_secs {
            return Err(ConfigError::config(format!(
                "websocket.heartbeat_timeout_secs ({}) must be greater than heartbeat_interval_secs ({})",
                self.heartbeat_timeout_secs, self.heartbeat_interval_secs
            )));
        }

        Ok(())
    }
}
