use super::super::{TEST_JWT_SECRET, create_test_state};
use crate::{ApiError, Caller};

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{body::Body, extract::FromRequestParts, http::Request};
use googletest::prelude::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;

fn token(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .unwrap()
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

async fn extract(
    request: Request<Body>,
    jwt_secret: Option<&[u8]>,
) -> Result<Caller, ApiError> {
    let state = create_test_state(jwt_secret).await;
    let (mut parts, _body) = request.into_parts();
    Caller::from_request_parts(&mut parts, &state).await
}

#[tokio::test]
async fn given_dev_mode_and_user_header_when_extract_then_caller_named() {
    let request = Request::builder()
        .header("X-User-Id", "u1")
        .body(Body::empty())
        .unwrap();

    let caller = extract(request, None).await.unwrap();

    assert_that!(
        caller.identity().map(|c| c.external_identity_id.as_str()),
        some(eq("u1"))
    );
}

#[tokio::test]
async fn given_dev_mode_and_blank_header_when_extract_then_no_caller() {
    let request = Request::builder()
        .header("X-User-Id", "   ")
        .body(Body::empty())
        .unwrap();

    let caller = extract(request, None).await.unwrap();

    assert_that!(caller.identity(), none());
}

#[tokio::test]
async fn given_auth_enabled_and_valid_token_when_extract_then_claims_become_caller() {
    let jwt = token(json!({
        "sub": "u1",
        "email": "a@x.com",
        "given_name": "Ann",
        "exp": now() + 3600,
        "iat": now(),
    }));
    let request = Request::builder()
        .header("Authorization", format!("Bearer {}", jwt))
        .body(Body::empty())
        .unwrap();

    let caller = extract(request, Some(TEST_JWT_SECRET)).await.unwrap();

    let identity = caller.identity().unwrap();
    assert_that!(identity.external_identity_id, eq("u1"));
    assert_that!(identity.email.as_deref(), some(eq("a@x.com")));
    assert_that!(identity.first_name.as_deref(), some(eq("Ann")));
}

#[tokio::test]
async fn given_auth_enabled_and_user_header_only_when_extract_then_header_ignored() {
    let request = Request::builder()
        .header("X-User-Id", "u1")
        .body(Body::empty())
        .unwrap();

    let caller = extract(request, Some(TEST_JWT_SECRET)).await.unwrap();

    assert_that!(caller.identity(), none());
}

#[tokio::test]
async fn given_auth_enabled_and_expired_token_when_extract_then_unauthenticated() {
    let jwt = token(json!({ "sub": "u1", "exp": now() - 3600, "iat": now() - 7200 }));
    let request = Request::builder()
        .header("Authorization", format!("Bearer {}", jwt))
        .body(Body::empty())
        .unwrap();

    let result = extract(request, Some(TEST_JWT_SECRET)).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}

#[tokio::test]
async fn given_auth_enabled_and_basic_scheme_when_extract_then_unauthenticated() {
    let request = Request::builder()
        .header("Authorization", "Basic dTE6cHc=")
        .body(Body::empty())
        .unwrap();

    let result = extract(request, Some(TEST_JWT_SECRET)).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated { .. })));
}
