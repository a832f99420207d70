//! Policy configuration for the guard.
//!
//! The defaults reproduce the fixed production policy: five failed attempts
//! inside a fifteen-minute window lock an identifier out, and the five most
//! recent password hashes may not be reused.
//!
//! # Example
//!
//! ```rust
//! use carelock::config::{GuardConfig, RateLimitConfig};
//! use chrono::Duration;
//!
//! // Use defaults
//! let config = GuardConfig::default();
//!
//! // Or customize
//! let config = GuardConfig {
//!     rate_limit: RateLimitConfig {
//!         max_failed_attempts: 3,
//!         lockout_window: Duration::minutes(30),
//!     },
//!     ..Default::default()
//! };
//! ```

use chrono::Duration;

/// Top-level configuration shared by the actions and the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct GuardConfig {
    /// Login lockout policy.
    pub rate_limit: RateLimitConfig,

    /// Password reuse policy.
    pub password_history: PasswordHistoryConfig,
}

impl GuardConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient limits for local development.
    pub fn development() -> Self {
        Self {
            rate_limit: RateLimitConfig {
                max_failed_attempts: 10,
                lockout_window: Duration::minutes(5),
            },
            password_history: PasswordHistoryConfig { max_history: 1 },
        }
    }

    /// Fewer attempts, longer lockout and a deeper reuse history.
    pub fn strict() -> Self {
        Self {
            rate_limit: RateLimitConfig {
                max_failed_attempts: 3,
                lockout_window: Duration::minutes(30),
            },
            password_history: PasswordHistoryConfig { max_history: 10 },
        }
    }
}

/// Configuration for login lockout.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Failed attempts tolerated inside the window before lockout.
    ///
    /// Default: 5
    pub max_failed_attempts: u32,

    /// Lookback window for counting failures. Also the lockout duration,
    /// measured from the oldest counted failure.
    ///
    /// Default: 15 minutes
    pub lockout_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_window: Duration::minutes(15),
        }
    }
}

impl RateLimitConfig {
    #[inline]
    pub fn lockout_window_minutes(&self) -> i64 {
        self.lockout_window.num_minutes()
    }
}

/// Configuration for password reuse checks.
#[derive(Debug, Clone)]
pub struct PasswordHistoryConfig {
    /// Number of most recent hashes a new hash is compared against.
    ///
    /// Default: 5
    pub max_history: u32,
}

impl Default for PasswordHistoryConfig {
    fn default() -> Self {
        Self { max_history: 5 }
    }
}
