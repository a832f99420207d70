#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::AuthError;
use crate::SecretString;

use super::password_history::{PasswordHistoryEntry, PasswordHistoryRepository};

#[derive(Clone, Default)]
pub struct MockPasswordHistoryRepository {
    pub entries: Arc<Mutex<Vec<PasswordHistoryEntry>>>,
    failure: Option<String>,
}

impl MockPasswordHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `DatabaseError(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![])),
            failure: Some(message.into()),
        }
    }

    pub fn count_for(&self, user_id: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
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
impl PasswordHistoryRepository for MockPasswordHistoryRepository {
    async fn find_recent(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<PasswordHistoryEntry>, AuthError> {
        self.check_failure()?;

        let mut found: Vec<PasswordHistoryEntry> = {
            let entries = self.entries.lock().unwrap();
            entries
                .iter()
                .rev()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect()
        };
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(found)
    }

    async fn append(
        &self,
        user_id: &str,
        password_hash: &SecretString,
        created_at: DateTime<Utc>,
    ) -> Result<PasswordHistoryEntry, AuthError> {
        self.check_failure()?;

        let entry = PasswordHistoryEntry {
            user_id: user_id.to_owned(),
            password_hash: password_hash.clone(),
            created_at,
        };
        self.entries.lock().unwrap().push(entry.clone());

        Ok(entry)
    }
}
