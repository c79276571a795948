//! Role reconciliation: sync the session identity into the directory, assign a
//! role on first use, and resolve the role for the rest of the session.

pub mod reconciliation_state;
pub mod role_reconciliation;
pub mod selection_outcome;
