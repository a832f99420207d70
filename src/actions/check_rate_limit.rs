use chrono::{DateTime, Utc};

use crate::config::RateLimitConfig;
use crate::events::{dispatch, GuardEvent};
use crate::validators::validate_identifier;
use crate::{AuthError, LoginAttemptRepository};

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The attempt was recorded. `remaining_attempts` is only reported for
    /// failed attempts.
    Allowed { remaining_attempts: Option<u32> },
    /// The identifier is locked out. Nothing was recorded.
    LockedOut { lockout_until: DateTime<Utc> },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            Self::Allowed { remaining_attempts } => *remaining_attempts,
            Self::LockedOut { .. } => None,
        }
    }

    pub fn lockout_until(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::LockedOut { lockout_until } => Some(*lockout_until),
            Self::Allowed { .. } => None,
        }
    }
}

/// Records login outcomes per identifier and decides whether the identifier
/// is locked out.
///
/// Failures are counted over a trailing window. Once the count reaches
/// `max_failed_attempts`, further failures are rejected until the window has
/// elapsed since the oldest counted failure. A success is always recorded
/// and allowed, and does not clear earlier failures.
///
/// The read and the append are separate store calls. Two concurrent failures
/// for the same identifier can both be admitted.
pub struct CheckRateLimitAction<L: LoginAttemptRepository> {
    repository: L,
    config: RateLimitConfig,
}

impl<L: LoginAttemptRepository> CheckRateLimitAction<L> {
    pub fn new(repository: L) -> Self {
        Self::with_config(repository, RateLimitConfig::default())
    }

    pub fn with_config(repository: L, config: RateLimitConfig) -> Self {
        Self { repository, config }
    }

    pub async fn execute(
        &self,
        identifier: &str,
        success: bool,
    ) -> Result<RateLimitDecision, AuthError> {
        self.execute_at(identifier, success, Utc::now()).await
    }

    /// Same as [`execute`](Self::execute) with an explicit clock reading.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "check_rate_limit", skip(self, identifier), err)
    )]
    pub async fn execute_at(
        &self,
        identifier: &str,
        success: bool,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, AuthError> {
        validate_identifier(identifier)?;

        let window_start = now - self.config.lockout_window;
        let attempts = self
            .repository
            .find_attempts_since(identifier, window_start)
            .await?;

        if success {
            self.record(identifier, true, now).await?;
            return Ok(RateLimitDecision::Allowed {
                remaining_attempts: None,
            });
        }

        let failed = u32::try_from(attempts.iter().filter(|a| a.is_failure()).count())
            .unwrap_or(u32::MAX);

        if failed >= self.config.max_failed_attempts {
            let oldest_failure = attempts
                .iter()
                .filter(|a| a.is_failure())
                .map(|a| a.attempted_at)
                .min();

            if let Some(oldest_failure) = oldest_failure {
                let lockout_until = oldest_failure + self.config.lockout_window;

                if now < lockout_until {
                    log::debug!(
                        target: "carelock",
                        "msg=\"login locked out\", failed_attempts={failed}, lockout_until=\"{lockout_until}\""
                    );
                    dispatch(GuardEvent::LoginLockedOut {
                        identifier: identifier.to_owned(),
                        failed_attempts: failed,
                        lockout_until,
                        at: now,
                    })
                    .await;

                    return Ok(RateLimitDecision::LockedOut { lockout_until });
                }
            }
            // The oldest counted failure sits exactly on the window edge and
            // has just expired: admit and record this failure.
        }

        self.record(identifier, false, now).await?;

        Ok(RateLimitDecision::Allowed {
            remaining_attempts: Some(
                self.config
                    .max_failed_attempts
                    .saturating_sub(failed)
                    .saturating_sub(1),
            ),
        })
    }

    async fn record(
        &self,
        identifier: &str,
        success: bool,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        self.repository
            .record_attempt(identifier, success, now)
            .await?;

        dispatch(GuardEvent::LoginAttemptRecorded {
            identifier: identifier.to_owned(),
            success,
            at: now,
        })
        .await;

        Ok(())
    }
}

/// Whole minutes until `lockout_until`, rounded up.
pub fn minutes_until(lockout_until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (lockout_until - now).num_milliseconds().max(0);
    (millis + 59_999) / 60_000
}
