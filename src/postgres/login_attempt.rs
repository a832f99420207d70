use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::{AuthError, LoginAttempt, LoginAttemptRepository};

#[derive(Clone)]
pub struct PostgresLoginAttemptRepository {
    pool: PgPool,
}

impl PostgresLoginAttemptRepository {
    pub fn new(pool: PgPool) -> Self {
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
impl LoginAttemptRepository for PostgresLoginAttemptRepository {
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
            VALUES ($1, $2, $3)
            RETURNING identifier, success, attempted_at
            ",
        )
        .bind(identifier)
        .bind(success)
        .bind(attempted_at)
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
            WHERE identifier = $1 AND attempted_at >= $2
            ORDER BY attempted_at DESC, id DESC
            ",
        )
        .bind(identifier)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "carelock", "msg=\"database error\", operation=\"find_login_attempts\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(records.into_iter().map(Into::into).collect())
    }
}
