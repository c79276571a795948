use crate::Role;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "role", rename_all = "snake_case")]
pub enum ReconciliationState {
    /// Stored role not observed yet
    #[default]
    Unresolved,
    /// Live read reported no record; waiting for the user to pick a role
    AwaitingSelection,
    /// Terminal for the session
    Resolved(Role),
}

impl ReconciliationState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Resolved(role) => Some(*role),
            _ => None,
        }
    }

    /// Role choices offered to the user in this state
    pub fn available_selections(&self) -> &'static [Role] {
        match self {
            Self::Resolved(_) => &[],
            _ => Role::all(),
        }
    }
}
