use crate::{WsError, WsResult};

use ih_directory::FeedKey;

use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::{info, warn};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Handed out by `ConnectionRegistry::register`; only the registry mints them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// What a live connection is watching, and for whom
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    /// External identity of the caller, when one was attached
    pub caller: Option<String>,
    pub key: FeedKey,
    pub connected_at: DateTime<Utc>,
}

/// Registry for tracking active feed connections
#[derive(Clone)]
pub struct ConnectionRegistry {
    inner: Arc<RwLock<HashMap<ConnectionId, ConnectionInfo>>>,
    max_total: usize,
}

impl ConnectionRegistry {
    pub fn new(max_total: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            max_total,
        }
    }

    /// Register a new connection, enforcing the total limit
    pub async fn register(
        &self,
        caller: Option<String>,
        key: FeedKey,
    ) -> WsResult<ConnectionId> {
        let location = ErrorLocation::from(Location::caller());
        let mut connections = self.inner.write().await;

        if connections.len() >= self.max_total {
            warn!(
                "Total connection limit reached: {}/{}",
                connections.len(),
                self.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                current: connections.len(),
                max: self.max_total,
                location,
            });
        }

        let connection_id = ConnectionId(Uuid::new_v4());
        connections.insert(
            connection_id,
            ConnectionInfo {
                connection_id,
                caller,
                key,
                connected_at: Utc::now(),
            },
        );
        info!(
            "Registered connection {connection_id} ({} total)",
            connections.len()
        );

        Ok(connection_id)
    }

    pub async fn unregister(&self, connection_id: ConnectionId) {
        let mut connections = self.inner.write().await;

        if connections.remove(&connection_id).is_some() {
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                connections.len()
            );
        }
    }

    pub async fn get(&self, connection_id: ConnectionId) -> Option<ConnectionInfo> {
        self.inner.read().await.get(&connection_id).cloned()
    }

    pub async fn total_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
