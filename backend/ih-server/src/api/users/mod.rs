pub mod assign_role_request;
pub mod sync_response;
pub mod user_dto;
pub mod user_list_response;
pub mod user_lookup_response;
pub mod user_response;
pub mod users;
