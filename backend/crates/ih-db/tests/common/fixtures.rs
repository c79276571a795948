use ih_core::UserRecord;

use chrono::{DateTime, Duration, Utc};

/// A new candidate record with second-precision timestamps
pub fn create_test_user(external_id: &str) -> UserRecord {
    let mut user = UserRecord::new(
        external_id.to_string(),
        format!("User {}", external_id),
        format!("{}@example.com", external_id),
        None,
    );
    let now = whole_seconds(Utc::now());
    user.created_at = now;
    user.updated_at = now;
    user
}

/// Same as `create_test_user` but created `offset_secs` after the epoch base
pub fn create_test_user_at(external_id: &str, base: DateTime<Utc>, offset_secs: i64) -> UserRecord {
    let mut user = create_test_user(external_id);
    let at = whole_seconds(base) + Duration::seconds(offset_secs);
    user.created_at = at;
    user.updated_at = at;
    user
}

fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}
