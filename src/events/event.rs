use chrono::{DateTime, Utc};

/// Events emitted by the guard actions.
///
/// Events are always fired. If no listeners are registered they are
/// silently dropped. Password hashes are never carried in an event.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardEvent {
    // login limiter
    LoginAttemptRecorded {
        identifier: String,
        success: bool,
        at: DateTime<Utc>,
    },
    LoginLockedOut {
        identifier: String,
        failed_attempts: u32,
        lockout_until: DateTime<Utc>,
        at: DateTime<Utc>,
    },

    // password history
    PasswordReuseRejected {
        user_id: String,
        at: DateTime<Utc>,
    },
    PasswordHistoryAppended {
        user_id: String,
        at: DateTime<Utc>,
    },
}

impl GuardEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginAttemptRecorded { success: true, .. } => "login.attempt.succeeded",
            Self::LoginAttemptRecorded { success: false, .. } => "login.attempt.failed",
            Self::LoginLockedOut { .. } => "login.locked_out",
            Self::PasswordReuseRejected { .. } => "password.reuse_rejected",
            Self::PasswordHistoryAppended { .. } => "password.history_appended",
        }
    }

    /// Lockouts and rejected reuse: outcomes someone may need to follow up on.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::LoginLockedOut { .. } | Self::PasswordReuseRejected { .. }
        )
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::LoginAttemptRecorded { at, .. }
            | Self::LoginLockedOut { at, .. }
            | Self::PasswordReuseRejected { at, .. }
            | Self::PasswordHistoryAppended { at, .. } => *at,
        }
    }
}
