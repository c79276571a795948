use crate::ClientError;

use ih_core::{Role, UserRecord};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// A user as the server renders it
#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: String,
    pub external_identity_id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<WireUser> for UserRecord {
    type Error = ClientError;

    fn try_from(user: WireUser) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&user.id)
            .map_err(|e| ClientError::decode(format!("invalid user id {}: {}", user.id, e)))?;
        let role = Role::from_str(&user.role).map_err(|e| ClientError::decode(e.to_string()))?;

        Ok(UserRecord {
            id,
            external_identity_id: user.external_identity_id,
            display_name: user.display_name,
            email: user.email,
            avatar_url: user.avatar_url,
            role,
            created_at: timestamp(user.created_at)?,
            updated_at: timestamp(user.updated_at)?,
        })
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, ClientError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| ClientError::decode(format!("timestamp out of range: {}", seconds)))
}
