//! Boundary between the reconciliation workflow and whatever hosts the
//! User Directory (in-process service or the REST API).

use crate::{Role, SyncProfile, UserRecord};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait DirectoryApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert-if-absent. Returns the new record id, or `None` when the identity already existed.
    async fn synchronize(&self, profile: &SyncProfile) -> Result<Option<Uuid>, Self::Error>;

    /// Set the role of an existing record. Fails when the record does not exist.
    async fn assign_role(&self, external_identity_id: &str, role: Role)
    -> Result<(), Self::Error>;

    /// Every record. Requires a caller identity.
    async fn list_all(&self) -> Result<Vec<UserRecord>, Self::Error>;

    async fn find_by_external_id(
        &self,
        external_identity_id: &str,
    ) -> Result<Option<UserRecord>, Self::Error>;
}

/// One delivery from a live read of a single identity's role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    /// Current role, or `None` while no record exists
    Role(Option<Role>),
    /// The feed ended; no further deliveries
    Closed,
}

/// Live read of one identity's role
#[async_trait]
pub trait RoleFeed: Send {
    async fn next(&mut self) -> FeedEvent;
}
