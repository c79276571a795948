use crate::UserDto;

use serde::Serialize;

/// Lookup by identity; `user` is null when no record exists
#[derive(Debug, Serialize)]
pub struct UserLookupResponse {
    pub user: Option<UserDto>,
}
