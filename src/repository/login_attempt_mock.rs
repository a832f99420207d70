#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;

use super::login_attempt::{LoginAttempt, LoginAttemptRepository};

#[derive(Clone, Default)]
pub struct MockLoginAttemptRepository {
    pub attempts: Arc<Mutex<Vec<LoginAttempt>>>,
    failure: Option<String>,
}

impl MockLoginAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `DatabaseError(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(vec![])),
            failure: Some(message.into()),
        }
    }

    /// Seeds a record without going through the limiter.
    pub fn push(&self, identifier: &str, success: bool, attempted_at: DateTime<Utc>) {
        self.attempts.lock().unwrap().push(LoginAttempt {
            identifier: identifier.to_owned(),
            success,
            attempted_at,
        });
    }

    pub fn count_for(&self, identifier: &str) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.identifier == identifier)
            .count()
    }

    fn check_failure(&self) -> Result<(), AuthError> {
        match &self.failure {
            Some(message) => Err(AuthError::DatabaseError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LoginAttemptRepository for MockLoginAttemptRepository {
    async fn record_attempt(
        &self,
        identifier: &str,
        success: bool,
        attempted_at: DateTime<Utc>,
    ) -> Result<LoginAttempt, AuthError> {
        self.check_failure()?;

        let attempt = LoginAttempt {
            identifier: identifier.to_owned(),
            success,
            attempted_at,
        };
        self.attempts.lock().unwrap().push(attempt.clone());

        Ok(attempt)
    }

    async fn find_attempts_since(
        &self,
        identifier: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<LoginAttempt>, AuthError> {
        self.check_failure()?;

        let mut found: Vec<LoginAttempt> = {
            let attempts = self.attempts.lock().unwrap();
            attempts
                .iter()
                .rev()
                .filter(|a| a.identifier == identifier && a.attempted_at >= since)
                .cloned()
                .collect()
        };
        found.sort_by(|a, b| b.attempted_at.cmp(&a.attempted_at));

        Ok(found)
    }
}
