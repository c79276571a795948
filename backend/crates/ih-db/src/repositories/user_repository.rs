use crate::{DbError, Result as DbErrorResult};

use ih_core::{Role, UserRecord};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, external_identity_id, display_name, email, avatar_url, \
                            role, created_at, updated_at";

/// New values for the mutable profile fields of one record
#[derive(Debug, Clone)]
pub struct ProfileUpdate<'a> {
    pub display_name: &'a str,
    pub email: &'a str,
    pub avatar_url: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    external_identity_id: String,
    display_name: String,
    email: String,
    avatar_url: Option<String>,
    role: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: Uuid::parse_str(&row.id).map_err(|e| DbError::decode("id", e.to_string()))?,
            external_identity_id: row.external_identity_id,
            display_name: row.display_name,
            email: row.email,
            avatar_url: row.avatar_url,
            role: Role::from_str(&row.role).map_err(|e| DbError::decode("role", e.to_string()))?,
            created_at: timestamp("created_at", row.created_at)?,
            updated_at: timestamp("updated_at", row.updated_at)?,
        })
    }
}

fn timestamp(column: &'static str, secs: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::decode(column, format!("timestamp out of range: {}", secs)))
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Atomic insert-if-absent keyed by `external_identity_id`.
    ///
    /// Returns the stored row when this call created it, `None` when a row for
    /// the identity already existed (that row is left untouched). Concurrent
    /// duplicates resolve to exactly one `Some`.
    pub async fn insert_if_absent(&self, user: &UserRecord) -> DbErrorResult<Option<UserRecord>> {
        let sql = format!(
            "INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(external_identity_id) DO NOTHING RETURNING {}",
            USER_COLUMNS, USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id.to_string())
            .bind(&user.external_identity_id)
            .bind(&user.display_name)
            .bind(&user.email)
            .bind(user.avatar_url.as_deref())
            .bind(user.role.as_str())
            .bind(user.created_at.timestamp())
            .bind(user.updated_at.timestamp())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    /// Set the role of one record. `None` when no record has that identity.
    pub async fn update_role(
        &self,
        external_identity_id: &str,
        role: Role,
        updated_at: DateTime<Utc>,
    ) -> DbErrorResult<Option<UserRecord>> {
        let sql = format!(
            "UPDATE users SET role = ?, updated_at = ? \
             WHERE external_identity_id = ? RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(role.as_str())
            .bind(updated_at.timestamp())
            .bind(external_identity_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    /// Overwrite the profile fields of one record. The role is never touched.
    pub async fn update_profile(
        &self,
        external_identity_id: &str,
        profile: &ProfileUpdate<'_>,
    ) -> DbErrorResult<Option<UserRecord>> {
        let sql = format!(
            "UPDATE users SET display_name = ?, email = ?, avatar_url = ?, updated_at = ? \
             WHERE external_identity_id = ? RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(profile.display_name)
            .bind(profile.email)
            .bind(profile.avatar_url)
            .bind(profile.updated_at.timestamp())
            .bind(external_identity_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    pub async fn find_by_external_id(
        &self,
        external_identity_id: &str,
    ) -> DbErrorResult<Option<UserRecord>> {
        let sql = format!(
            "SELECT {} FROM users WHERE external_identity_id = ?",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(external_identity_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<UserRecord>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    /// Every record, oldest first
    pub async fn find_all(&self) -> DbErrorResult<Vec<UserRecord>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at ASC, external_identity_id ASC",
            USER_COLUMNS
        );

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRecord::try_from).collect()
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
