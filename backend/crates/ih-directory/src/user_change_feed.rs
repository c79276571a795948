use crate::{FeedKey, UserChange};

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::{RwLock, broadcast};

/// Live-read channels, one per followed query.
///
/// A channel exists only while it has receivers. Writers publish after their
/// statement commits; each change goes to the identity's channel and to the
/// all-users channel.
pub struct UserChangeFeed {
    pub(crate) inner: Arc<RwLock<FeedInner>>,
    capacity: usize,
}

pub(crate) struct FeedInner {
    channels: HashMap<FeedKey, broadcast::Sender<UserChange>>,
}

impl UserChangeFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FeedInner {
                channels: HashMap::new(),
            })),
            capacity: capacity.max(1),
        }
    }

    /// Also sweeps channels whose receivers are all gone, covering watches
    /// whose `Drop` could not take the lock.
    pub async fn subscribe(&self, key: &FeedKey) -> broadcast::Receiver<UserChange> {
        let mut inner = self.inner.write().await;

        let before = inner.channels.len();
        inner
            .channels
            .retain(|_, sender| sender.receiver_count() > 0);
        if inner.channels.len() < before {
            debug!(
                "Swept {} empty change channel(s)",
                before - inner.channels.len()
            );
        }

        let sender = inner.channels.entry(key.clone()).or_insert_with(|| {
            let (sender, _) = broadcast::channel(self.capacity);
            info!("Created change channel {}", key);
            sender
        });
        let receiver = sender.subscribe();

        debug!(
            "Subscribed to {} ({} total subscribers)",
            key,
            sender.receiver_count()
        );

        receiver
    }

    /// Drop `receiver` and remove the channel once nobody follows it.
    pub async fn unsubscribe(&self, key: &FeedKey, receiver: broadcast::Receiver<UserChange>) {
        drop(receiver);
        let mut inner = self.inner.write().await;
        Self::prune(&mut inner, key);
    }

    /// Non-blocking variant of `unsubscribe` for use from `Drop`.
    /// Under contention the channel is pruned by the next subscribe instead.
    pub(crate) fn release(&self, key: &FeedKey) {
        if let Ok(mut inner) = self.inner.try_write() {
            Self::prune(&mut inner, key);
        }
    }

    fn prune(inner: &mut FeedInner, key: &FeedKey) {
        let empty = inner
            .channels
            .get(key)
            .is_some_and(|sender| sender.receiver_count() == 0);

        if empty {
            inner.channels.remove(key);
            info!("Removed empty change channel {}", key);
        }
    }

    /// Deliver a committed change. Returns the number of receivers reached.
    pub async fn publish(&self, change: &UserChange) -> usize {
        let keys = [
            FeedKey::user(change.user.external_identity_id.clone()),
            FeedKey::AllUsers,
        ];

        let mut delivered = 0;
        let mut stale = Vec::new();
        {
            let inner = self.inner.read().await;
            for key in keys {
                let Some(sender) = inner.channels.get(&key) else {
                    continue;
                };

                match sender.send(change.clone()) {
                    Ok(receivers) => {
                        debug!(
                            "Published {} to {} ({} receivers)",
                            change.kind.as_str(),
                            key,
                            receivers
                        );
                        delivered += receivers;
                    }
                    Err(_) => stale.push(key),
                }
            }
        }

        if !stale.is_empty() {
            let mut inner = self.inner.write().await;
            for key in &stale {
                Self::prune(&mut inner, key);
            }
        }

        delivered
    }

    pub async fn subscriber_count(&self, key: &FeedKey) -> usize {
        let inner = self.inner.read().await;
        inner
            .channels
            .get(key)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    pub async fn channel_count(&self) -> usize {
        self.inner.read().await.channels.len()
    }
}

impl Clone for UserChangeFeed {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}
