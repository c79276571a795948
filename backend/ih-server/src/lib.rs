pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod ws;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::caller::Caller,
    users::{
        assign_role_request::AssignRoleRequest,
        sync_response::SyncResponse,
        user_dto::UserDto,
        user_list_response::UserListResponse,
        user_lookup_response::UserLookupResponse,
        user_response::UserResponse,
        users::{assign_role, get_user, list_users, refresh_profile, sync_user},
    },
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
pub use ws::{
    connection_registry::{ConnectionId, ConnectionInfo, ConnectionRegistry},
    error::{Result as WsResult, WsError},
    feed_connection::FeedConnection,
    feed_message::FeedMessage,
    metrics::WsMetrics,
    shutdown_coordinator::ShutdownCoordinator,
    shutdown_guard::ShutdownGuard,
    user_feed::{all_users_feed, user_feed},
};
