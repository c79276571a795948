//! User directory REST API handlers

use crate::{
    ApiError, ApiResult, AppState, AssignRoleRequest, Caller, SyncResponse, UserDto, UserListResponse,
    UserLookupResponse, UserResponse,
};

use ih_core::{Role, SyncProfile};

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

/// POST /api/v1/users/sync
///
/// Insert-if-absent. Repeat calls report `created: false` and change nothing.
pub async fn sync_user(
    State(state): State<AppState>,
    body: Result<Json<SyncProfile>, JsonRejection>,
) -> ApiResult<Json<SyncResponse>> {
    let Json(profile) = body?;

    let id = state.directory.synchronize(&profile).await?;

    Ok(Json(SyncResponse {
        created: id.is_some(),
        id: id.map(|id| id.to_string()),
    }))
}

/// PUT /api/v1/users/:external_id/role
pub async fn assign_role(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    body: Result<Json<AssignRoleRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(request) = body?;
    let role = Role::from_str(&request.role)?;

    let user = state.directory.assign_role(&external_id, role).await?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// PUT /api/v1/users/:external_id/profile
///
/// Overwrites display name, email and avatar. The path wins over any
/// identity in the body. With token verification on, only the user named in
/// the path may refresh their own profile.
pub async fn refresh_profile(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    caller: Caller,
    body: Result<Json<SyncProfile>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    if state.jwt_validator.is_some() {
        let caller = caller
            .identity()
            .ok_or_else(|| ApiError::unauthenticated("A signed-in caller is required"))?;
        if caller.external_identity_id != external_id {
            return Err(ApiError::forbidden("Callers may only refresh their own profile"));
        }
    }

    let Json(mut profile) = body?;
    profile.external_identity_id = external_id;

    let user = state.directory.refresh_profile(&profile).await?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// GET /api/v1/users
///
/// Requires a caller; the configured list policy decides which callers.
pub async fn list_users(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<UserListResponse>> {
    let users = state.directory.list_all(caller.identity()).await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserDto::from).collect(),
    }))
}

/// GET /api/v1/users/:external_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> ApiResult<Json<UserLookupResponse>> {
    let user = state.directory.find_by_external_id(&external_id).await?;

    Ok(Json(UserLookupResponse {
        user: user.map(UserDto::from),
    }))
}
