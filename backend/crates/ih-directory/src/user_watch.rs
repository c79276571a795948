use crate::{
    DirectoryMetrics, FeedKey, Result as DirectoryErrorResult, UserChange, UserChangeFeed,
};

use ih_core::{FeedEvent, RoleFeed, UserRecord};
use ih_db::UserRepository;

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::broadcast::{self, error::RecvError};

/// One delivery from a live read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Changed(UserChange),
    /// The subscriber fell behind and `n` changes were dropped; re-read the snapshot
    Lagged(u64),
}

/// A live read: the result at subscription time plus every later change.
///
/// The receiver is registered before the snapshot is read, so no committed
/// change can fall between the two. Dropping the watch releases its channel.
pub struct UserWatch {
    key: FeedKey,
    snapshot: Vec<UserRecord>,
    receiver: Option<broadcast::Receiver<UserChange>>,
    feed: UserChangeFeed,
    repository: Arc<UserRepository>,
    metrics: DirectoryMetrics,
    snapshot_delivered: bool,
}

impl UserWatch {
    pub(crate) fn new(
        key: FeedKey,
        snapshot: Vec<UserRecord>,
        receiver: broadcast::Receiver<UserChange>,
        feed: UserChangeFeed,
        repository: Arc<UserRepository>,
        metrics: DirectoryMetrics,
    ) -> Self {
        metrics.watch_opened();
        Self {
            key,
            snapshot,
            receiver: Some(receiver),
            feed,
            repository,
            metrics,
            snapshot_delivered: false,
        }
    }

    pub fn key(&self) -> &FeedKey {
        &self.key
    }

    /// Records matching the query when the watch was opened
    pub fn snapshot(&self) -> &[UserRecord] {
        &self.snapshot
    }

    /// The single-identity snapshot; `None` while no record exists
    pub fn current(&self) -> Option<&UserRecord> {
        self.snapshot.first()
    }

    /// Next change, or `None` once the feed is gone
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        let receiver = self.receiver.as_mut()?;

        match receiver.recv().await {
            Ok(change) => Some(WatchEvent::Changed(change)),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Watcher of {} lagged, {} changes dropped", self.key, skipped);
                Some(WatchEvent::Lagged(skipped))
            }
            Err(RecvError::Closed) => None,
        }
    }

    /// Replace the snapshot with a fresh read, after `Lagged`.
    ///
    /// The receiver stays registered throughout, so changes committed during
    /// the read are still delivered afterwards.
    pub async fn reload(&mut self) -> DirectoryErrorResult<&[UserRecord]> {
        self.snapshot = match &self.key {
            FeedKey::User(external_identity_id) => self
                .repository
                .find_by_external_id(external_identity_id)
                .await?
                .into_iter()
                .collect(),
            FeedKey::AllUsers => self.repository.find_all().await?,
        };
        debug!("Reloaded snapshot of {}", self.key);

        Ok(&self.snapshot)
    }

    pub async fn unsubscribe(mut self) {
        if let Some(receiver) = self.receiver.take() {
            self.feed.unsubscribe(&self.key, receiver).await;
        }
    }
}

impl Drop for UserWatch {
    fn drop(&mut self) {
        if let Some(receiver) = self.receiver.take() {
            drop(receiver);
            self.feed.release(&self.key);
        }
        self.metrics.watch_closed();
    }
}

#[async_trait]
impl RoleFeed for UserWatch {
    /// The snapshot's role first, then the role carried by each change.
    /// After a lag the stored role is re-read instead.
    async fn next(&mut self) -> FeedEvent {
        if !self.snapshot_delivered {
            self.snapshot_delivered = true;
            return FeedEvent::Role(self.current().map(|user| user.role));
        }

        loop {
            match self.recv().await {
                Some(WatchEvent::Changed(change)) => return FeedEvent::Role(Some(change.user.role)),
                Some(WatchEvent::Lagged(_)) => {
                    let reloaded = self.reload().await.map(|_| ());
                    match reloaded {
                        Ok(()) => return FeedEvent::Role(self.current().map(|user| user.role)),
                        Err(e) => warn!("Reload of {} failed, waiting for a change: {}", self.key, e),
                    }
                }
                None => return FeedEvent::Closed,
            }
        }
    }
}
