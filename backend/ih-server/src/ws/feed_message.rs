use crate::UserDto;

use ih_directory::{ChangeKind, UserChange};

use serde::Serialize;

/// JSON frame pushed to live feed clients
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    /// Single-identity feed on connect; `user` is null while no record exists
    Snapshot { user: Option<UserDto> },
    /// All-users feed on connect
    #[serde(rename = "snapshot")]
    ListSnapshot { users: Vec<UserDto> },
    Created { user: UserDto },
    RoleAssigned { user: UserDto },
    ProfileUpdated { user: UserDto },
    /// Changes were dropped; the client should re-read
    Lagged { missed: u64 },
}

impl FeedMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::Snapshot { .. } | Self::ListSnapshot { .. } => "snapshot",
            Self::Created { .. } => "created",
            Self::RoleAssigned { .. } => "role_assigned",
            Self::ProfileUpdated { .. } => "profile_updated",
            Self::Lagged { .. } => "lagged",
        }
    }
}

impl From<UserChange> for FeedMessage {
    fn from(change: UserChange) -> Self {
        let user = UserDto::from(change.user);
        match change.kind {
            ChangeKind::Created => Self::Created { user },
            ChangeKind::RoleAssigned => Self::RoleAssigned { user },
            ChangeKind::ProfileUpdated => Self::ProfileUpdated { user },
        }
    }
}
