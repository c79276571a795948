use crate::{
    ConnectionId, FeedMessage, ShutdownGuard, UserDto, WsError, WsMetrics, WsResult,
};

use ih_auth::ConnectionRateLimiter;
use ih_config::WebSocketConfig;
use ih_directory::{FeedKey, UserWatch, WatchEvent};

use std::panic::Location;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// Streams one live read to one WebSocket client
pub struct FeedConnection {
    connection_id: ConnectionId,
    config: WebSocketConfig,
    metrics: WsMetrics,
    rate_limiter: ConnectionRateLimiter,
    watch: UserWatch,
}

impl FeedConnection {
    pub fn new(
        connection_id: ConnectionId,
        config: WebSocketConfig,
        metrics: WsMetrics,
        rate_limiter: ConnectionRateLimiter,
        watch: UserWatch,
    ) -> Self {
        Self {
            connection_id,
            config,
            metrics,
            rate_limiter,
            watch,
        }
    }

    /// Snapshot first, then every change until the client leaves, the
    /// heartbeat lapses or the server shuts down.
    pub async fn handle(
        mut self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsResult<()> {
        log::info!(
            "Feed connection {} established for {}",
            self.connection_id,
            self.watch.key()
        );
        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded channel for outgoing messages (backpressure handling)
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let mut heartbeat = tokio::time::interval(Duration::from_secs(
            self.config.heartbeat_interval_secs,
        ));
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        heartbeat.tick().await;
        let mut last_seen = Instant::now();

        let result = match self.send(&tx, self.snapshot()).await {
            Err(e) => Err(e),
            Ok(()) => loop {
                tokio::select! {
                    msg = ws_receiver.next() => {
                        match msg {
                            Some(Ok(msg)) => {
                                last_seen = Instant::now();
                                match self.handle_client_message(msg, &tx).await {
                                    Ok(true) => {}
                                    Ok(false) => break Ok(()),
                                    Err(e) => {
                                        self.metrics.error_occurred("client_message");
                                        break Err(e);
                                    }
                                }
                            }
                            Some(Err(e)) => {
                                break Err(WsError::ConnectionClosed {
                                    reason: format!("WebSocket error: {}", e),
                                    location: ErrorLocation::from(Location::caller()),
                                });
                            }
                            None => {
                                log::info!("Connection {} closed by client", self.connection_id);
                                break Ok(());
                            }
                        }
                    }

                    event = self.watch.recv() => {
                        match event {
                            Some(WatchEvent::Changed(change)) => {
                                if let Err(e) = self.send(&tx, FeedMessage::from(change)).await {
                                    break Err(e);
                                }
                            }
                            Some(WatchEvent::Lagged(missed)) => {
                                self.metrics.error_occurred("feed_lagged");
                                if let Err(e) = self.resync(&tx, missed).await {
                                    break Err(e);
                                }
                            }
                            None => {
                                log::info!("Feed closed for connection {}", self.connection_id);
                                break Ok(());
                            }
                        }
                    }

                    _ = heartbeat.tick() => {
                        if last_seen.elapsed() > Duration::from_secs(self.config.heartbeat_timeout_secs) {
                            break Err(WsError::HeartbeatTimeout {
                                timeout_secs: self.config.heartbeat_timeout_secs,
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        if tx.send(Message::Ping(Bytes::new())).await.is_err() {
                            break Err(WsError::SendBufferFull {
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }

                    _ = shutdown_guard.wait() => {
                        log::info!("Shutting down connection {} gracefully", self.connection_id);
                        let _ = tx.send(Message::Close(None)).await;
                        break Ok(());
                    }
                }
            },
        };

        let key = self.watch.key().clone();
        self.watch.unsubscribe().await;
        drop(tx); // Close channel to terminate send task
        let _ = send_task.await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });
        log::info!("Feed connection {} closed for {}", self.connection_id, key);

        result
    }

    fn snapshot(&self) -> FeedMessage {
        match self.watch.key() {
            FeedKey::User(_) => FeedMessage::Snapshot {
                user: self.watch.current().cloned().map(UserDto::from),
            },
            FeedKey::AllUsers => FeedMessage::ListSnapshot {
                users: self
                    .watch
                    .snapshot()
                    .iter()
                    .cloned()
                    .map(UserDto::from)
                    .collect(),
            },
        }
    }

    /// Tell the client it missed changes, then send a fresh snapshot.
    /// When the re-read fails the client only gets the `lagged` frame.
    async fn resync(&mut self, tx: &mpsc::Sender<Message>, missed: u64) -> WsResult<()> {
        self.send(tx, FeedMessage::Lagged { missed }).await?;

        let reloaded = self.watch.reload().await.map(|_| ());
        match reloaded {
            Ok(()) => self.send(tx, self.snapshot()).await,
            Err(e) => {
                log::warn!("Connection {} could not resync: {}", self.connection_id, e);
                Ok(())
            }
        }
    }

    /// `Ok(false)` when the client asked to close
    async fn handle_client_message(
        &mut self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsResult<bool> {
        self.metrics.message_received();

        match msg {
            Message::Ping(data) => {
                tx.send(Message::Pong(data))
                    .await
                    .map_err(|_| WsError::SendBufferFull {
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                Ok(true)
            }
            Message::Pong(_) => Ok(true),
            Message::Close(_) => {
                log::info!("Received close frame from connection {}", self.connection_id);
                Ok(false)
            }
            Message::Text(_) | Message::Binary(_) => {
                // The feed is push-only; clients only spend their budget here
                self.rate_limiter.check().map_err(|source| {
                    log::warn!("Rate limit exceeded for connection {}", self.connection_id);
                    WsError::RateLimited {
                        source,
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;
                log::debug!("Ignoring client payload on connection {}", self.connection_id);
                Ok(true)
            }
        }
    }

    async fn send(&self, tx: &mpsc::Sender<Message>, message: FeedMessage) -> WsResult<()> {
        let message_type = message.message_type();
        let json = serde_json::to_string(&message).map_err(|source| WsError::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        tx.send(Message::Text(json.into()))
            .await
            .map_err(|_| WsError::SendBufferFull {
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.metrics.message_sent(message_type);
        Ok(())
    }
}
