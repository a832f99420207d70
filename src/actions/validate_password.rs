use chrono::{DateTime, Utc};

use crate::config::PasswordHistoryConfig;
use crate::events::{dispatch, GuardEvent};
use crate::validators::validate_password_history_input;
use crate::{AuthError, PasswordHistoryRepository, SecretString};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordReuseDecision {
    /// The hash was new and has been appended to the history.
    Valid,
    /// The hash matches a recent one. Nothing was written.
    Reused,
}

impl PasswordReuseDecision {
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Rejects a password hash that matches one of the user's most recent hashes.
///
/// Only the newest `max_history` entries are compared; there is no age
/// cutoff. Hashes are compared exactly, so callers must hash
/// deterministically for a reuse to be detected.
pub struct ValidatePasswordAction<H: PasswordHistoryRepository> {
    repository: H,
    config: PasswordHistoryConfig,
}

impl<H: PasswordHistoryRepository> ValidatePasswordAction<H> {
    pub fn new(repository: H) -> Self {
        Self::with_config(repository, PasswordHistoryConfig::default())
    }

    pub fn with_config(repository: H, config: PasswordHistoryConfig) -> Self {
        Self { repository, config }
    }

    pub async fn execute(
        &self,
        user_id: &str,
        new_password_hash: &SecretString,
    ) -> Result<PasswordReuseDecision, AuthError> {
        self.execute_at(user_id, new_password_hash, Utc::now()).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "validate_password", skip_all, err)
    )]
    pub async fn execute_at(
        &self,
        user_id: &str,
        new_password_hash: &SecretString,
        now: DateTime<Utc>,
    ) -> Result<PasswordReuseDecision, AuthError> {
        validate_password_history_input(user_id, new_password_hash)?;

        let recent = self
            .repository
            .find_recent(user_id, self.config.max_history)
            .await?;

        if recent
            .iter()
            .any(|entry| entry.password_hash == *new_password_hash)
        {
            dispatch(GuardEvent::PasswordReuseRejected {
                user_id: user_id.to_owned(),
                at: now,
            })
            .await;

            return Ok(PasswordReuseDecision::Reused);
        }

        self.repository
            .append(user_id, new_password_hash, now)
            .await?;

        dispatch(GuardEvent::PasswordHistoryAppended {
            user_id: user_id.to_owned(),
            at: now,
        })
        .await;

        Ok(PasswordReuseDecision::Valid)
    }
}
