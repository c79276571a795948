//! REST API error types
//!
//! Every failure leaves the server as `{ "error": { "code", "message", "field"? } }`
//! with a matching HTTP status.

use ih_auth::AuthError;
use ih_core::CoreError;
use ih_directory::DirectoryError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 401
    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    /// 403
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 400
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// 503
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
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

    #[track_caller]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Unauthenticated { .. } => "UNAUTHENTICATED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::Unavailable { .. } => "SERVICE_UNAVAILABLE",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { .. } | ApiError::Unavailable { .. } => log::error!("{}", self),
            _ => log::debug!("{}", self),
        }

        let status = self.status();
        let code = self.code().to_string();

        let body = match self {
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code,
                message,
                field,
            },
            ApiError::NotFound { message, .. }
            | ApiError::Unauthenticated { message, .. }
            | ApiError::Forbidden { message, .. }
            | ApiError::BadRequest { message, .. }
            | ApiError::Unavailable { message, .. }
            | ApiError::Internal { message, .. } => ApiErrorBody {
                code,
                message,
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    #[track_caller]
    fn from(e: DirectoryError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            DirectoryError::NotFound {
                external_identity_id,
                ..
            } => ApiError::NotFound {
                message: format!("User {} not found", external_identity_id),
                location,
            },
            DirectoryError::Unauthenticated { .. } => ApiError::Unauthenticated {
                message: "A caller identity is required".to_string(),
                location,
            },
            DirectoryError::Forbidden { message, .. } => ApiError::Forbidden { message, location },
            DirectoryError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location,
            },
            DirectoryError::Database { source, .. } => {
                // Storage details stay in the log
                log::error!("Database error: {}", source);
                ApiError::Internal {
                    message: "Database operation failed".to_string(),
                    location,
                }
            }
        }
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        DirectoryError::from(e).into()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        log::warn!("Authentication failed: {}", e);
        ApiError::Unauthenticated {
            message: format!("{} ({})", auth_message(&e), e.error_code()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

fn auth_message(e: &AuthError) -> &'static str {
    match e {
        AuthError::TokenExpired { .. } => "Token expired",
        AuthError::MissingHeader { .. } => "Missing authorization header",
        AuthError::InvalidScheme { .. } => "Expected a Bearer token",
        AuthError::RateLimitExceeded { .. } => "Rate limit exceeded",
        _ => "Invalid token",
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
