use ih_auth::AuthError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection limit reached: {current}/{max} {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Send buffer full or closed {location}")]
    SendBufferFull { location: ErrorLocation },

    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Heartbeat timed out after {timeout_secs}s {location}")]
    HeartbeatTimeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Client message rejected: {source} {location}")]
    RateLimited {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    #[error("Failed to encode feed message: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, WsError>;
