#![allow(dead_code)]

//! Test infrastructure for ih-server API tests

use ih_auth::{JwtValidator, RateLimiterFactory};
use ih_config::{DirectoryConfig, ListPolicy, RateLimitConfig, WebSocketConfig};
use ih_directory::UserDirectory;
use ih_server::{AppState, ConnectionRegistry, ShutdownCoordinator, WsMetrics, build_router};

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use axum_test::TestServer;
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

/// HS256 requires at least 32 bytes
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub jwt_secret: Option<Vec<u8>>,
    pub list_policy: ListPolicy,
    pub max_connections: usize,
    pub rate_limit: RateLimitConfig,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            list_policy: ListPolicy::AnyAuthenticated,
            max_connections: 100,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl TestConfig {
    pub fn with_jwt() -> Self {
        Self {
            jwt_secret: Some(TEST_JWT_SECRET.to_vec()),
            ..Default::default()
        }
    }

    pub fn with_policy(list_policy: ListPolicy) -> Self {
        Self {
            list_policy,
            ..Default::default()
        }
    }
}

pub async fn create_test_app_state(config: TestConfig) -> AppState {
    let pool = ih_db::open_in_memory()
        .await
        .expect("Failed to create test database");

    let directory = UserDirectory::new(
        pool.clone(),
        &DirectoryConfig {
            list_policy: config.list_policy,
            ..DirectoryConfig::default()
        },
    );

    AppState {
        pool,
        directory,
        jwt_validator: config
            .jwt_secret
            .map(|secret| Arc::new(JwtValidator::with_hs256(&secret))),
        rate_limiter_factory: RateLimiterFactory::new(config.rate_limit),
        registry: ConnectionRegistry::new(config.max_connections),
        metrics: WsMetrics::new(),
        shutdown: ShutdownCoordinator::new(),
        websocket: WebSocketConfig::default(),
        request_timeout: Duration::from_secs(5),
        prometheus: None,
    }
}

pub fn create_router(state: &AppState) -> Router {
    build_router(state.clone())
}

/// Real HTTP transport, needed for WebSocket upgrades
pub fn create_test_server(state: &AppState) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(build_router(state.clone()))
        .expect("Failed to create test server")
}

/// Send one request through the router and decode the JSON body
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub fn sync_body(external_id: &str, email: &str, display_name: &str) -> Value {
    json!({
        "external_identity_id": external_id,
        "email": email,
        "display_name": display_name,
    })
}

pub fn create_test_token(subject: &str, email: Option<&str>) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs();

    encode(
        &Header::default(),
        &json!({ "sub": subject, "email": email, "exp": now + 3600, "iat": now }),
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .expect("Failed to encode JWT")
}
