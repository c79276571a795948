use sqlx::SqlitePool;

/// In-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    ih_db::open_in_memory()
        .await
        .expect("Failed to create test pool")
}

/// Insert a row bypassing the repository, for constraint tests
pub async fn insert_raw_user(pool: &SqlitePool, id: &str, external_id: &str, role: &str) {
    sqlx::query(
        "INSERT INTO users (id, external_identity_id, email, role, created_at, updated_at) \
         VALUES (?, ?, 'raw@example.com', ?, 0, 0)",
    )
    .bind(id)
    .bind(external_id)
    .bind(role)
    .execute(pool)
    .await
    .expect("Failed to insert raw user");
}
