//! In-Memory User Store
//!
//! Backs the test suites and local development. Same contract as the
//! Postgres store, including upsert-by-id semantics and email
//! uniqueness.

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::UserStore;
use crate::error::{IdentityError, IdentityResult};
use kernel::id::UserId;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryUserStore {
    // keyed by exact email
    inner: Mutex<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, UserRecord>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<UserRecord>> {
        Ok(self.lock().get(email).cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<UserRecord>> {
        Ok(self.lock().values().find(|r| r.id == *user_id).cloned())
    }

    async fn save(&self, record: &UserRecord) -> IdentityResult<UserRecord> {
        let mut map = self.lock();

        if let Some(existing) = map.get(record.email.as_str()) {
            if existing.id != record.id {
                return Err(IdentityError::EmailTaken);
            }
        }

        // Re-key when an existing account changed its email.
        let stale_key = map
            .iter()
            .find(|(key, r)| r.id == record.id && key.as_str() != record.email.as_str())
            .map(|(key, _)| key.clone());
        if let Some(key) = stale_key {
            map.remove(&key);
        }

        map.insert(record.email.as_str().to_string(), record.clone());
        Ok(record.clone())
    }

    async fn delete_by_email(&self, email: &str) -> IdentityResult<()> {
        self.lock().remove(email);
        Ok(())
    }
}
