//! Redacting wrapper for credential material.
//!
//! Password hashes travel through request bodies, actions and repositories.
//! Wrapping them keeps them out of `Debug` output, log lines and tracing
//! spans.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// A string whose `Debug` and `Display` output is `[REDACTED]`.
///
/// # Example
///
/// ```rust
/// use carelock::SecretString;
///
/// let hash = SecretString::new("$argon2id$v=19$...");
///
/// assert_eq!(format!("{hash:?}"), "SecretString([REDACTED])");
/// assert_eq!(hash.expose_secret(), "$argon2id$v=19$...");
/// ```
#[derive(Clone, Default)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Only call this where the raw value is compared or persisted.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

// Deserialize only: hashes come in through request bodies and never go back
// out in a response.
impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString(s))
    }
}
