use crate::{DirectoryError, UserDirectory};

use ih_auth::CallerIdentity;
use ih_core::{DirectoryApi, Role, SyncProfile, UserRecord};

use async_trait::async_trait;
use uuid::Uuid;

/// The directory as seen by one caller
#[derive(Clone)]
pub struct DirectorySession {
    directory: UserDirectory,
    caller: Option<CallerIdentity>,
}

impl DirectorySession {
    pub fn new(directory: UserDirectory, caller: Option<CallerIdentity>) -> Self {
        Self { directory, caller }
    }

    pub fn caller(&self) -> Option<&CallerIdentity> {
        self.caller.as_ref()
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }
}

#[async_trait]
impl DirectoryApi for DirectorySession {
    type Error = DirectoryError;

    async fn synchronize(&self, profile: &SyncProfile) -> Result<Option<Uuid>, DirectoryError> {
        self.directory.synchronize(profile).await
    }

    async fn assign_role(
        &self,
        external_identity_id: &str,
        role: Role,
    ) -> Result<(), DirectoryError> {
        self.directory
            .assign_role(external_identity_id, role)
            .await
            .map(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        self.directory.list_all(self.caller.as_ref()).await
    }

    async fn find_by_external_id(
        &self,
        external_identity_id: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        self.directory.find_by_external_id(external_identity_id).await
    }
}
