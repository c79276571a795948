//! WebSocket endpoints for live reads of the directory

use crate::{ApiError, ApiResult, AppState, Caller, ConnectionId, FeedConnection, WsError};

use ih_auth::ConnectionRateLimiter;
use ih_directory::{FeedKey, UserWatch};

use axum::{
    extract::{
        Path, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use log::{debug, error};
use tracing::Instrument;

/// GET /ws/users/:external_id
///
/// Live read of one identity's record
pub async fn user_feed(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    caller: Caller,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let key = FeedKey::user(&external_id);
    let connection_id = register(&state, &caller, &key).await?;

    let watch = match state.directory.watch(&external_id).await {
        Ok(watch) => watch,
        Err(e) => {
            state.registry.unregister(connection_id).await;
            return Err(e.into());
        }
    };

    Ok(upgrade(ws, state, connection_id, watch))
}

/// GET /ws/users
///
/// Live read of every record, under the same gate as the list endpoint
pub async fn all_users_feed(
    State(state): State<AppState>,
    caller: Caller,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let connection_id = register(&state, &caller, &FeedKey::AllUsers).await?;

    let watch = match state.directory.watch_all(caller.identity()).await {
        Ok(watch) => watch,
        Err(e) => {
            state.registry.unregister(connection_id).await;
            state.metrics.connection_rejected(e.kind());
            return Err(e.into());
        }
    };

    Ok(upgrade(ws, state, connection_id, watch))
}

async fn register(state: &AppState, caller: &Caller, key: &FeedKey) -> ApiResult<ConnectionId> {
    if state.shutdown.is_shutdown() {
        return Err(ApiError::unavailable("Server is shutting down"));
    }

    let subject = caller.identity().map(|c| c.external_identity_id.clone());
    debug!("Feed upgrade request for {} from {:?}", key, subject);

    state
        .registry
        .register(subject, key.clone())
        .await
        .map_err(|e| match e {
            WsError::ConnectionLimitExceeded { current, max, .. } => {
                state.metrics.connection_rejected("limit");
                ApiError::unavailable(format!("Connection limit reached ({}/{})", current, max))
            }
            other => ApiError::internal(other.to_string()),
        })
}

fn upgrade(
    ws: WebSocketUpgrade,
    state: AppState,
    connection_id: ConnectionId,
    watch: UserWatch,
) -> Response {
    let rate_limiter = state.rate_limiter_factory.create();
    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, state, rate_limiter, watch))
}

async fn handle_socket(
    socket: WebSocket,
    connection_id: ConnectionId,
    state: AppState,
    rate_limiter: ConnectionRateLimiter,
    watch: UserWatch,
) {
    let span = tracing::info_span!(
        "feed_connection",
        connection_id = %connection_id,
        key = %watch.key()
    );

    async move {
        let shutdown_guard = state.shutdown.subscribe_guard();
        let connection = FeedConnection::new(
            connection_id,
            state.websocket.clone(),
            state.metrics.clone(),
            rate_limiter,
            watch,
        );

        let result = connection.handle(socket, shutdown_guard).await;

        state.registry.unregister(connection_id).await;

        if let Err(e) = result {
            error!("Connection {connection_id} error: {e}");
        }
    }
    .instrument(span)
    .await
}
