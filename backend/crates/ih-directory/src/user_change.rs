use ih_core::UserRecord;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    RoleAssigned,
    ProfileUpdated,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::RoleAssigned => "role_assigned",
            Self::ProfileUpdated => "profile_updated",
        }
    }
}

/// A committed write, carrying the record as stored after the write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChange {
    pub kind: ChangeKind,
    pub user: UserRecord,
}

impl UserChange {
    pub fn new(kind: ChangeKind, user: UserRecord) -> Self {
        Self { kind, user }
    }
}
