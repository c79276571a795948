use ih_core::UserRecord;

use serde::Serialize;

/// User DTO for JSON serialization
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub external_identity_id: String,
    pub display_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<UserRecord> for UserDto {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id.to_string(),
            external_identity_id: u.external_identity_id,
            display_name: u.display_name,
            email: u.email,
            avatar_url: u.avatar_url,
            role: u.role.as_str().to_string(),
            created_at: u.created_at.timestamp(),
            updated_at: u.updated_at.timestamp(),
        }
    }
}
