use crate::{
    DirectoryApi, FeedEvent, IdentityAssertion, ReconciliationState, Role, RoleFeed,
    SelectionOutcome,
};

use log::{debug, info};

/// Per-session state machine that decides which role the current identity has.
///
/// The live read of the identity's record drives `observe`; the two
/// user-triggered actions drive `select_role`.
pub struct RoleReconciliation<D: DirectoryApi> {
    directory: D,
    state: ReconciliationState,
}

impl<D: DirectoryApi> RoleReconciliation<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            state: ReconciliationState::Unresolved,
        }
    }

    pub fn state(&self) -> ReconciliationState {
        self.state
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Feed a value from the live read into the state machine.
    ///
    /// A defined role resolves the session without user interaction. An
    /// absent record moves `Unresolved` to `AwaitingSelection`. `Resolved` is
    /// terminal.
    pub fn observe(&mut self, role: Option<Role>) -> ReconciliationState {
        self.state = match (self.state, role) {
            (ReconciliationState::Resolved(current), _) => ReconciliationState::Resolved(current),
            (_, Some(role)) => {
                info!("Stored role observed: {}", role);
                ReconciliationState::Resolved(role)
            }
            (ReconciliationState::Unresolved, None) => ReconciliationState::AwaitingSelection,
            (state, None) => state,
        };

        self.state
    }

    /// Sync the identity, then assign the chosen role, then resolve.
    ///
    /// An incomplete identity (no subject id or no primary email) aborts
    /// silently. Errors from either directory call are returned untouched and
    /// leave the state as it was, so the action can be retried.
    pub async fn select_role(
        &mut self,
        identity: &IdentityAssertion,
        role: Role,
    ) -> Result<SelectionOutcome, D::Error> {
        let Some(profile) = identity.to_sync_profile() else {
            debug!("Role selection ignored: identity not fully loaded");
            return Ok(SelectionOutcome::Aborted);
        };

        // assign_role requires the record to exist, so step 1 must finish first
        self.directory.synchronize(&profile).await?;
        self.directory
            .assign_role(&profile.external_identity_id, role)
            .await?;

        info!(
            "Role {} selected for {}",
            role, profile.external_identity_id
        );
        self.state = ReconciliationState::Resolved(role);

        Ok(SelectionOutcome::Resolved(role))
    }

    /// Look up the stored record once and feed its role into `observe`.
    pub async fn refresh(
        &mut self,
        external_identity_id: &str,
    ) -> Result<ReconciliationState, D::Error> {
        let record = self
            .directory
            .find_by_external_id(external_identity_id)
            .await?;

        Ok(self.observe(record.map(|r| r.role)))
    }

    /// Follow a live feed until the session resolves or the feed closes.
    pub async fn follow<F: RoleFeed>(&mut self, feed: &mut F) -> ReconciliationState {
        while !self.state.is_resolved() {
            match feed.next().await {
                FeedEvent::Role(role) => {
                    self.observe(role);
                }
                FeedEvent::Closed => {
                    debug!("Role feed closed before resolution");
                    break;
                }
            }
        }

        self.state
    }
}
