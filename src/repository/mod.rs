//! Repository traits and data types.
//!
//! Implement these traits to back the guard with your own storage.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`LoginAttemptRepository`] | Append-only login attempt log |
//! | [`PasswordHistoryRepository`] | Per-user password hash history |
//!
//! Enable the `mocks` feature for in-memory implementations useful for testing:
//!
//! - [`MockLoginAttemptRepository`]
//! - [`MockPasswordHistoryRepository`]

mod login_attempt;
mod password_history;

#[cfg(any(test, feature = "mocks"))]
mod login_attempt_mock;
#[cfg(any(test, feature = "mocks"))]
mod password_history_mock;

pub use login_attempt::LoginAttempt;
pub use login_attempt::LoginAttemptRepository;
pub use password_history::PasswordHistoryEntry;
pub use password_history::PasswordHistoryRepository;

#[cfg(any(test, feature = "mocks"))]
pub use login_attempt_mock::MockLoginAttemptRepository;
#[cfg(any(test, feature = "mocks"))]
pub use password_history_mock::MockPasswordHistoryRepository;
