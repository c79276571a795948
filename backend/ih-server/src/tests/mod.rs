mod api;
mod ws;

use crate::{AppState, ConnectionRegistry, ShutdownCoordinator, WsMetrics};

use ih_auth::{JwtValidator, RateLimiterFactory};
use ih_config::{DirectoryConfig, WebSocketConfig};
use ih_directory::UserDirectory;

use std::sync::Arc;
use std::time::Duration;

pub(crate) const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-unit-tests-min-32-bytes-long";

pub(crate) async fn create_test_state(jwt_secret: Option<&[u8]>) -> AppState {
    let pool = ih_db::open_in_memory()
        .await
        .expect("Failed to create test pool");

    AppState {
        pool: pool.clone(),
        directory: UserDirectory::new(pool, &DirectoryConfig::default()),
        jwt_validator: jwt_secret.map(|secret| Arc::new(JwtValidator::with_hs256(secret))),
        rate_limiter_factory: RateLimiterFactory::default(),
        registry: ConnectionRegistry::new(16),
        metrics: WsMetrics::new(),
        shutdown: ShutdownCoordinator::new(),
        websocket: WebSocketConfig::default(),
        request_timeout: Duration::from_secs(5),
        prometheus: None,
    }
}
