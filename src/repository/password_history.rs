use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;
use crate::SecretString;

/// A password hash previously set by a user.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHistoryEntry {
    pub user_id: String,
    pub password_hash: SecretString,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for PasswordHistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHistoryEntry")
            .field("user_id", &self.user_id)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Append-only password history per user.
///
/// History is bounded by count at read time, not by age.
#[async_trait]
pub trait PasswordHistoryRepository: Send + Sync {
    /// Up to `limit` entries for `user_id`, newest first.
    async fn find_recent(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<PasswordHistoryEntry>, AuthError>;

    async fn append(
        &self,
        user_id: &str,
        password_hash: &SecretString,
        created_at: DateTime<Utc>,
    ) -> Result<PasswordHistoryEntry, AuthError>;
}
