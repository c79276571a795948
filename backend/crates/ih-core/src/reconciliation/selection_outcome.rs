use crate::Role;

/// Result of a successful `select_role` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Identity was incomplete; nothing happened
    Aborted,
    /// Record synchronized and role assigned
    Resolved(Role),
}
