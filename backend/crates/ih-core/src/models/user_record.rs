//! User record - one per distinct external identity.

use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable directory entry for a single external identity.
///
/// `external_identity_id` is the Identity Store subject and never changes.
/// Profile fields (`display_name`, `email`, `avatar_url`) only change through
/// a profile refresh; `role` only changes through role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub external_identity_id: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a brand new record. The role is always the default role.
    pub fn new(
        external_identity_id: String,
        display_name: String,
        email: String,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            external_identity_id,
            display_name,
            email,
            avatar_url,
            role: Role::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_interviewer(&self) -> bool {
        self.role == Role::Interviewer
    }

    pub fn is_candidate(&self) -> bool {
        self.role == Role::Candidate
    }
}
