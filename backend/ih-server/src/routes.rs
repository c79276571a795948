use crate::{
    ApiError, AppState, all_users_feed, assign_role, get_user, health, list_users,
    refresh_profile, sync_user, user_feed,
};

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    response::IntoResponse,
    routing::{get, post, put},
};
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    let api = Router::new()
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users/sync", post(sync_user))
        .route("/api/v1/users/{external_id}", get(get_user))
        .route("/api/v1/users/{external_id}/role", put(assign_role))
        .route("/api/v1/users/{external_id}/profile", put(refresh_profile))
        // Long-lived sockets must not be cut by the request timeout
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(timeout)),
        );

    Router::new()
        .merge(api)
        // Live reads
        .route("/ws/users", get(all_users_feed))
        .route("/ws/users/{external_id}", get(user_feed))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/metrics", get(health::metrics))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn handle_timeout(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::unavailable("Request timed out")
    } else {
        ApiError::internal(format!("Unhandled service error: {}", err))
    }
}
