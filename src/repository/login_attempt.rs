use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// One recorded authentication outcome.
///
/// Attempts are append-only: once written they are never updated or deleted
/// by the limiter. `attempted_at` is assigned by the limiter, never by the
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    /// Email address or IP the attempt is grouped under.
    pub identifier: String,
    pub success: bool,
    pub attempted_at: DateTime<Utc>,
}

impl LoginAttempt {
    pub fn is_failure(&self) -> bool {
        !self.success
    }
}

/// Append-only log of login attempts, queryable by identifier and time.
///
/// The log is the single source of truth for lockout decisions; nothing is
/// cached between calls.
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
    async fn record_attempt(
        &self,
        identifier: &str,
        success: bool,
        attempted_at: DateTime<Utc>,
    ) -> Result<LoginAttempt, AuthError>;

    /// All attempts for `identifier` with `attempted_at >= since`, newest first.
    async fn find_attempts_since(
        &self,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<LoginAttempt>, AuthError>;
}
