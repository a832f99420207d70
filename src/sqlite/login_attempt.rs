use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::timestamp;
use crate::{AuthError, LoginAttempt, LoginAttemptRepository};

#[derive(Clone)]
pub struct SqliteLoginAttemptRepository {
    pool: SqlitePool,
}

impl SqliteLoginAttemptRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct LoginAttemptRecord {
    identifier: String,
    success: bool,
    attempted_at: DateTime<Utc>,
}

impl From<LoginAttemptRecord> for LoginAttempt {
    fn from(record: LoginAttemptRecord) -> Self {
        LoginAttempt {
            identifier: record.identifier,
            success: record.success,
            attempted_at: record.attempted_at,
        }
    }
}

#[async_trait]
impl LoginAttemptRepository for SqliteLoginAttemptRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, identifier), err))]
    async fn record_attempt(
        &self,
        identifier: &str,
        success: bool,
        attempted_at: DateTime<Utc>,
    ) -> Result<LoginAttempt, AuthError> {
        let record: LoginAttemptRecord = sqlx::query_as(
            r"
            INSERT INTO login_attempts (identifier, success, attempted_at)
            VALUES (?, ?, ?)
            RETURNING identifier, success, attempted_at
            ",
        )
        .bind(identifier)
        .bind(success)
        .bind(timestamp::encode(attempted_at))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "carelock", "msg=\"database error\", operation=\"record_login_attempt\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(record.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, identifier), err))]
    async fn find_attempts_since(
        &self,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<LoginAttempt>, AuthError> {
        let records: Vec<LoginAttemptRecord> = sqlx::query_as(
            r"
            SELECT identifier, success, attempted_at
            FROM login_attempts
            WHERE identifier = ? AND attempted_at >= ?
            ORDER BY attempted_at DESC, id DESC
            ",
        )
        .bind(identifier)
        .bind(timestamp::encode(since))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "carelock", "msg=\"database error\", operation=\"find_login_attempts\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
