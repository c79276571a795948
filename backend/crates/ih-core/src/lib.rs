pub mod directory_api;
pub mod error;
pub mod models;
pub mod reconciliation;

pub use directory_api::{DirectoryApi, FeedEvent, RoleFeed};
pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::identity_assertion::IdentityAssertion;
pub use models::role::Role;
pub use models::sync_profile::SyncProfile;
pub use models::user_record::UserRecord;
pub use reconciliation::reconciliation_state::ReconciliationState;
pub use reconciliation::role_reconciliation::RoleReconciliation;
pub use reconciliation::selection_outcome::SelectionOutcome;

#[cfg(test)]
mod tests;
