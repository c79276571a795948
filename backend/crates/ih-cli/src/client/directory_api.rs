use crate::{Client, ClientError, WireUser};

use ih_core::{DirectoryApi, Role, SyncProfile, UserRecord};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// The remote directory, so the reconciliation workflow can run from the command line
#[async_trait]
impl DirectoryApi for Client {
    type Error = ClientError;

    async fn synchronize(&self, profile: &SyncProfile) -> Result<Option<Uuid>, ClientError> {
        let body = self.sync_user(profile).await?;

        match body.get("id") {
            Some(Value::String(id)) => Uuid::parse_str(id)
                .map(Some)
                .map_err(|e| ClientError::decode(format!("invalid id {}: {}", id, e))),
            Some(Value::Null) | None => Ok(None),
            Some(other) => Err(ClientError::decode(format!("unexpected id: {}", other))),
        }
    }

    async fn assign_role(&self, external_identity_id: &str, role: Role) -> Result<(), ClientError> {
        Client::assign_role(self, external_identity_id, role)
            .await
            .map(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, ClientError> {
        let mut body = self.list_users().await?;
        let users: Vec<WireUser> = serde_json::from_value(take_field(&mut body, "users"))?;

        users.into_iter().map(UserRecord::try_from).collect()
    }

    async fn find_by_external_id(
        &self,
        external_identity_id: &str,
    ) -> Result<Option<UserRecord>, ClientError> {
        let mut body = self.get_user(external_identity_id).await?;
        let user: Option<WireUser> = serde_json::from_value(take_field(&mut body, "user"))?;

        user.map(UserRecord::try_from).transpose()
    }
}

fn take_field(body: &mut Value, field: &str) -> Value {
    body.get_mut(field).map(Value::take).unwrap_or(Value::Null)
}
