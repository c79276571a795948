use crate::{CoreError, Result as CoreErrorResult, UserRecord};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Profile fields pushed into the directory when an identity is synchronized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncProfile {
    pub external_identity_id: String,
    /// May be empty, never absent
    #[serde(default)]
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl SyncProfile {
    /// Check the synchronization preconditions: identity id and email must be non-empty.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.external_identity_id.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "external_identity_id cannot be empty".to_string(),
                field: Some("external_identity_id".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.email.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "email cannot be empty".to_string(),
                field: Some("email".to_string()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Build the record created on first synchronization
    pub fn into_new_record(self) -> UserRecord {
        UserRecord::new(
            self.external_identity_id,
            self.display_name,
            self.email,
            self.avatar_url,
        )
    }
}
