use crate::ApiError;

use ih_core::{CoreError, Role};
use ih_directory::DirectoryError;

use std::panic::Location;
use std::str::FromStr;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_with_code() {
    let (status, json) = body_json(ApiError::not_found("User u1 not found")).await;

    assert_that!(status, eq(StatusCode::NOT_FOUND));
    assert_that!(json["error"]["code"], eq(&serde_json::json!("NOT_FOUND")));
    assert_that!(json["error"]["message"], eq(&serde_json::json!("User u1 not found")));
    assert_that!(json["error"].get("field"), none());
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    let error = ApiError::Validation {
        message: "email cannot be empty".into(),
        field: Some("email".into()),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["error"]["code"], eq(&serde_json::json!("VALIDATION_ERROR")));
    assert_that!(json["error"]["field"], eq(&serde_json::json!("email")));
}

#[tokio::test]
async fn given_directory_unauthenticated_when_converted_then_401() {
    let (status, json) = body_json(DirectoryError::unauthenticated().into()).await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"]["code"], eq(&serde_json::json!("UNAUTHENTICATED")));
}

#[tokio::test]
async fn given_directory_forbidden_when_converted_then_403() {
    let (status, json) = body_json(DirectoryError::forbidden("interviewers only").into()).await;

    assert_that!(status, eq(StatusCode::FORBIDDEN));
    assert_that!(json["error"]["code"], eq(&serde_json::json!("FORBIDDEN")));
}

#[tokio::test]
async fn given_database_failure_when_converted_then_500_without_details() {
    let db_error = ih_db::DbError::from(sqlx::Error::PoolClosed);

    let (status, json) = body_json(DirectoryError::from(db_error).into()).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(json["error"]["code"], eq(&serde_json::json!("INTERNAL_ERROR")));
    assert_that!(
        json["error"]["message"].as_str(),
        some(eq("Database operation failed"))
    );
}

#[test]
fn given_unknown_role_literal_when_converted_then_validation_on_role_field() {
    let core: CoreError = Role::from_str("admin").unwrap_err();

    let error = ApiError::from(core);

    assert!(matches!(
        error,
        ApiError::Validation { field: Some(ref f), .. } if f == "role"
    ));
}

#[test]
fn given_each_variant_when_coded_then_status_matches() {
    assert_that!(ApiError::bad_request("x").code(), eq("BAD_REQUEST"));
    assert_that!(ApiError::bad_request("x").status(), eq(StatusCode::BAD_REQUEST));
    assert_that!(
        ApiError::unavailable("x").status(),
        eq(StatusCode::SERVICE_UNAVAILABLE)
    );
    assert_that!(
        ApiError::internal("x").status(),
        eq(StatusCode::INTERNAL_SERVER_ERROR)
    );
}
