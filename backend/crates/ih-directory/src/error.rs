use ih_core::CoreError;
use ih_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The identity has no record yet; `synchronize` must run first
    #[error("No user record for identity {external_identity_id} {location}")]
    NotFound {
        external_identity_id: String,
        location: ErrorLocation,
    },

    #[error("Caller identity required {location}")]
    Unauthenticated { location: ErrorLocation },

    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Database error: {source} {location}")]
    Database {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },
}

impl DirectoryError {
    #[track_caller]
    pub fn not_found(external_identity_id: impl Into<String>) -> Self {
        Self::NotFound {
            external_identity_id: external_identity_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short label for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Unauthenticated { .. } => "unauthenticated",
            Self::Forbidden { .. } => "forbidden",
            Self::Validation { .. } => "validation",
            Self::Database { .. } => "database",
        }
    }
}

impl From<DbError> for DirectoryError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Database {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for DirectoryError {
    #[track_caller]
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation {
                message,
                field,
                location,
            } => Self::Validation {
                message,
                field,
                location,
            },
            CoreError::InvalidRole { value, location } => Self::Validation {
                message: format!("unknown role: {}", value),
                field: Some("role".to_string()),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
