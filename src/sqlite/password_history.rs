use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::timestamp;
use crate::{AuthError, PasswordHistoryEntry, PasswordHistoryRepository, SecretString};

#[derive(Clone)]
pub struct SqlitePasswordHistoryRepository {
    pool: SqlitePool,
}

impl SqlitePasswordHistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PasswordHistoryRecord {
    user_id: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<PasswordHistoryRecord> for PasswordHistoryEntry {
    fn from(record: PasswordHistoryRecord) -> Self {
        PasswordHistoryEntry {
            user_id: record.user_id,
            password_hash: SecretString::new(record.password_hash),
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl PasswordHistoryRepository for SqlitePasswordHistoryRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_recent(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<PasswordHistoryEntry>, AuthError> {
        let records: Vec<PasswordHistoryRecord> = sqlx::query_as(
            r"
            SELECT user_id, password_hash, created_at
            FROM password_history
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            ",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "carelock", "msg=\"database error\", operation=\"find_password_history\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, password_hash), err))]
    async fn append(
        &self,
        user_id: &str,
        password_hash: &SecretString,
        created_at: DateTime<Utc>,
    ) -> Result<PasswordHistoryEntry, AuthError> {
        let record: PasswordHistoryRecord = sqlx::query_as(
            r"
            INSERT INTO password_history (user_id, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING user_id, password_hash, created_at
            ",
        )
        .bind(user_id)
        .bind(password_hash.expose_secret())
        .bind(timestamp::encode(created_at))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "carelock", "msg=\"database error\", operation=\"append_password_history\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(record.into())
    }
}
