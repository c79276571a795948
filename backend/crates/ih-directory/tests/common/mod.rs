#![allow(dead_code)]

use ih_auth::CallerIdentity;
use ih_config::{DirectoryConfig, ListPolicy};
use ih_core::SyncProfile;
use ih_directory::UserDirectory;

use tempfile::TempDir;

/// Directory over a fresh in-memory database
pub async fn create_test_directory(list_policy: ListPolicy) -> UserDirectory {
    let pool = ih_db::open_in_memory()
        .await
        .expect("Failed to create test pool");

    UserDirectory::new(
        pool,
        &DirectoryConfig {
            list_policy,
            ..DirectoryConfig::default()
        },
    )
}

/// Directory whose change channels hold only `feed_capacity` undelivered changes
pub async fn create_small_feed_directory(feed_capacity: usize) -> UserDirectory {
    let pool = ih_db::open_in_memory()
        .await
        .expect("Failed to create test pool");

    UserDirectory::new(
        pool,
        &DirectoryConfig {
            feed_capacity,
            ..DirectoryConfig::default()
        },
    )
}

/// Directory over a multi-connection file pool, so writes really run in parallel.
/// Keep the `TempDir` alive for the duration of the test.
pub async fn create_pooled_directory(max_connections: u32) -> (TempDir, UserDirectory) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let pool = ih_db::open_pool(&temp.path().join("users.db"), max_connections)
        .await
        .expect("Failed to create test pool");

    (temp, UserDirectory::new(pool, &DirectoryConfig::default()))
}

pub fn profile(external_id: &str, email: &str, display_name: &str) -> SyncProfile {
    SyncProfile {
        external_identity_id: external_id.to_string(),
        display_name: display_name.to_string(),
        email: email.to_string(),
        avatar_url: None,
    }
}

pub fn caller(external_id: &str) -> CallerIdentity {
    CallerIdentity::from_subject(external_id)
}
