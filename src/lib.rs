//! Login-attempt lockout and password-reuse guard.
//!
//! Two decisions back the hospital inventory service's sign-in flow:
//!
//! - [`actions::CheckRateLimitAction`] records every login outcome for an
//!   identifier (email or IP) and locks the identifier out once too many
//!   failures pile up inside a trailing window.
//! - [`actions::ValidatePasswordAction`] rejects a new password hash that
//!   matches one of the user's most recent hashes.
//!
//! Storage sits behind the [`LoginAttemptRepository`] and
//! [`PasswordHistoryRepository`] traits, with `PostgreSQL` (`sqlx_postgres`),
//! `SQLite` (`sqlx_sqlite`) and in-memory (`mocks`) implementations.

pub mod actions;
pub mod config;
pub mod events;
pub mod repository;
pub mod secret;
pub mod validators;

#[cfg(feature = "axum_api")]
pub mod api;

#[cfg(feature = "sqlx_postgres")]
pub mod postgres;

#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;

use std::fmt;

pub use config::{GuardConfig, PasswordHistoryConfig, RateLimitConfig};
pub use events::register_event_listeners;
pub use repository::{
    LoginAttempt, LoginAttemptRepository, PasswordHistoryEntry, PasswordHistoryRepository,
};
pub use secret::SecretString;
pub use validators::ValidationError;

#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockLoginAttemptRepository, MockPasswordHistoryRepository};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    Validation(ValidationError),
    DatabaseError(String),
    ConfigurationError(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(err) => write!(f, "{err}"),
            AuthError::DatabaseError(msg) => write!(f, "{msg}"),
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}
