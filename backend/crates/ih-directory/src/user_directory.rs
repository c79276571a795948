use crate::{
    ChangeKind, DirectoryError, DirectoryMetrics, DirectorySession, FeedKey, ListPolicy,
    Result as DirectoryErrorResult, UserChange, UserChangeFeed, UserWatch,
};

use ih_auth::CallerIdentity;
use ih_config::DirectoryConfig;
use ih_core::{Role, SyncProfile, UserRecord};
use ih_db::{ProfileUpdate, UserRepository};

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use uuid::Uuid;

/// The User Directory: one durable record per external identity.
///
/// Cheap to clone; clones share the store, the change feed and the policy.
///
/// Writes run one at a time, each holding `writes` from its statement through
/// its publish, so watchers receive changes in commit order.
#[derive(Clone)]
pub struct UserDirectory {
    repository: Arc<UserRepository>,
    writes: Arc<Mutex<()>>,
    feed: UserChangeFeed,
    policy: ListPolicy,
    metrics: DirectoryMetrics,
}

impl UserDirectory {
    pub fn new(pool: SqlitePool, config: &DirectoryConfig) -> Self {
        Self {
            repository: Arc::new(UserRepository::new(pool)),
            writes: Arc::new(Mutex::new(())),
            feed: UserChangeFeed::new(config.feed_capacity),
            policy: config.list_policy,
            metrics: DirectoryMetrics::new(),
        }
    }

    pub fn policy(&self) -> ListPolicy {
        self.policy
    }

    pub fn feed(&self) -> &UserChangeFeed {
        &self.feed
    }

    /// Bind a caller identity, producing a `DirectoryApi` for the workflow
    pub fn session(&self, caller: Option<CallerIdentity>) -> DirectorySession {
        DirectorySession::new(self.clone(), caller)
    }

    /// Insert-if-absent. `Some(id)` when this call created the record, `None`
    /// when it already existed (nothing is modified in that case).
    pub async fn synchronize(&self, profile: &SyncProfile) -> DirectoryErrorResult<Option<Uuid>> {
        let result = self.try_synchronize(profile).await;
        self.observed(result)
    }

    async fn try_synchronize(&self, profile: &SyncProfile) -> DirectoryErrorResult<Option<Uuid>> {
        profile.validate()?;

        let candidate = profile.clone().into_new_record();
        let _write = self.writes.lock().await;
        let Some(created) = self.repository.insert_if_absent(&candidate).await? else {
            debug!(
                "Identity {} already synchronized",
                profile.external_identity_id
            );
            self.metrics.sync_existing();
            return Ok(None);
        };

        info!(
            "Created user {} for identity {}",
            created.id, created.external_identity_id
        );
        self.metrics.user_created();
        let id = created.id;
        self.publish(ChangeKind::Created, created).await;

        Ok(Some(id))
    }

    /// Set the role of an existing record. `NotFound` when the identity was
    /// never synchronized.
    pub async fn assign_role(
        &self,
        external_identity_id: &str,
        role: Role,
    ) -> DirectoryErrorResult<UserRecord> {
        let result = self.try_assign_role(external_identity_id, role).await;
        self.observed(result)
    }

    async fn try_assign_role(
        &self,
        external_identity_id: &str,
        role: Role,
    ) -> DirectoryErrorResult<UserRecord> {
        let _write = self.writes.lock().await;
        let updated = self
            .repository
            .update_role(external_identity_id, role, Utc::now())
            .await?
            .ok_or_else(|| DirectoryError::not_found(external_identity_id))?;

        info!("Assigned role {} to {}", role, external_identity_id);
        self.metrics.role_assigned(role);
        self.publish(ChangeKind::RoleAssigned, updated.clone()).await;

        Ok(updated)
    }

    /// Every record, oldest first. Requires a caller; the policy decides which callers.
    pub async fn list_all(
        &self,
        caller: Option<&CallerIdentity>,
    ) -> DirectoryErrorResult<Vec<UserRecord>> {
        let result = match self.authorize_list(caller).await {
            Ok(()) => self.repository.find_all().await.map_err(DirectoryError::from),
            Err(e) => Err(e),
        };
        if result.is_ok() {
            self.metrics.list_served();
        }
        self.observed(result)
    }

    pub async fn find_by_external_id(
        &self,
        external_identity_id: &str,
    ) -> DirectoryErrorResult<Option<UserRecord>> {
        let result = self
            .repository
            .find_by_external_id(external_identity_id)
            .await
            .map_err(DirectoryError::from);
        self.observed(result)
    }

    /// Overwrite display name, email and avatar of an existing record. Never touches the role.
    pub async fn refresh_profile(&self, profile: &SyncProfile) -> DirectoryErrorResult<UserRecord> {
        let result = self.try_refresh_profile(profile).await;
        self.observed(result)
    }

    async fn try_refresh_profile(&self, profile: &SyncProfile) -> DirectoryErrorResult<UserRecord> {
        profile.validate()?;

        let _write = self.writes.lock().await;
        let update = ProfileUpdate {
            display_name: &profile.display_name,
            email: &profile.email,
            avatar_url: profile.avatar_url.as_deref(),
            updated_at: Utc::now(),
        };
        let updated = self
            .repository
            .update_profile(&profile.external_identity_id, &update)
            .await?
            .ok_or_else(|| DirectoryError::not_found(&profile.external_identity_id))?;

        info!("Refreshed profile of {}", profile.external_identity_id);
        self.metrics.profile_refreshed();
        self.publish(ChangeKind::ProfileUpdated, updated.clone()).await;

        Ok(updated)
    }

    /// Live read of one identity's record
    pub async fn watch(&self, external_identity_id: &str) -> DirectoryErrorResult<UserWatch> {
        let key = FeedKey::user(external_identity_id);

        // No write may land between the subscription and the snapshot read
        let _write = self.writes.lock().await;
        let receiver = self.feed.subscribe(&key).await;

        match self.repository.find_by_external_id(external_identity_id).await {
            Ok(current) => Ok(UserWatch::new(
                key,
                current.into_iter().collect(),
                receiver,
                self.feed.clone(),
                Arc::clone(&self.repository),
                self.metrics.clone(),
            )),
            Err(e) => {
                self.feed.unsubscribe(&key, receiver).await;
                self.metrics.operation_failed("database");
                Err(e.into())
            }
        }
    }

    /// Live read of every record, under the same gate as `list_all`
    pub async fn watch_all(
        &self,
        caller: Option<&CallerIdentity>,
    ) -> DirectoryErrorResult<UserWatch> {
        let authorized = self.authorize_list(caller).await;
        self.observed(authorized)?;

        let key = FeedKey::AllUsers;
        let _write = self.writes.lock().await;
        let receiver = self.feed.subscribe(&key).await;

        match self.repository.find_all().await {
            Ok(users) => Ok(UserWatch::new(
                key,
                users,
                receiver,
                self.feed.clone(),
                Arc::clone(&self.repository),
                self.metrics.clone(),
            )),
            Err(e) => {
                self.feed.unsubscribe(&key, receiver).await;
                self.metrics.operation_failed("database");
                Err(e.into())
            }
        }
    }

    async fn authorize_list(&self, caller: Option<&CallerIdentity>) -> DirectoryErrorResult<()> {
        let Some(caller) = caller else {
            return Err(DirectoryError::unauthenticated());
        };

        match self.policy {
            ListPolicy::AnyAuthenticated => Ok(()),
            ListPolicy::InterviewersOnly => {
                let stored = self
                    .repository
                    .find_by_external_id(&caller.external_identity_id)
                    .await?;

                if stored.is_some_and(|user| user.is_interviewer()) {
                    Ok(())
                } else {
                    Err(DirectoryError::forbidden(
                        "listing users requires the interviewer role",
                    ))
                }
            }
        }
    }

    async fn publish(&self, kind: ChangeKind, user: UserRecord) {
        let receivers = self.feed.publish(&UserChange::new(kind, user)).await;
        self.metrics.change_published(receivers);
    }

    /// Count failures by kind; the result passes through unchanged
    fn observed<T>(&self, result: DirectoryErrorResult<T>) -> DirectoryErrorResult<T> {
        if let Err(e) = &result {
            match e {
                DirectoryError::Database { .. } => warn!("Directory operation failed: {}", e),
                _ => debug!("Directory operation rejected: {}", e),
            }
            self.metrics.operation_failed(e.kind());
        }
        result
    }
}
