use crate::{ConnectionRegistry, ShutdownCoordinator, WsMetrics};

use ih_auth::{JwtValidator, RateLimiterFactory};
use ih_config::WebSocketConfig;
use ih_directory::UserDirectory;

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

/// Shared application state for REST and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub directory: UserDirectory,
    /// `None` runs in development mode: callers are named by the `X-User-Id` header
    pub jwt_validator: Option<Arc<JwtValidator>>,
    pub rate_limiter_factory: RateLimiterFactory,
    pub registry: ConnectionRegistry,
    pub metrics: WsMetrics,
    pub shutdown: ShutdownCoordinator,
    pub websocket: WebSocketConfig,
    pub request_timeout: Duration,
    /// Renders `/metrics` when a recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}
