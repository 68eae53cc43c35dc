//! Registration Use-Case
//!
//! Creates an account with the `User` role regardless of what the caller
//! asks for; role elevation is an administrative concern, not a
//! self-service one. Duplicate identifiers, lost races, and policy
//! violations read as `false`; a freshly written account that the login
//! directory cannot see is reported as inconsistent state and never
//! squashed.

use crate::application::config::IdentityConfig;
use crate::application::directory::UserDirectory;
use crate::application::flow_outcome;
use crate::domain::entity::user::UserRecord;
use crate::domain::repository::UserStore;
use crate::domain::value_object::email::Email;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{IdentityError, IdentityResult};
use platform::password::ClearTextPassword;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub struct RegisterUseCase<S> {
    store: Arc<S>,
    directory: UserDirectory<S>,
    config: Arc<IdentityConfig>,
}

impl<S> Clone for RegisterUseCase<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: self.directory.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: UserStore + Sync> RegisterUseCase<S> {
    pub fn new(store: Arc<S>, directory: UserDirectory<S>, config: Arc<IdentityConfig>) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<bool> {
        flow_outcome(self.attempt(input).await)
    }

    async fn attempt(&self, input: RegisterInput) -> IdentityResult<bool> {
        let email = Email::new(input.email)?;

        if self.store.find_by_email(email.as_str()).await?.is_some() {
            tracing::debug!(identifier = email.as_str(), "registration rejected: identifier taken");
            return Ok(false);
        }
        // The directory projects the same store, so a hit here means a
        // concurrent registration landed between the two lookups. That is
        // an ordinary duplicate, not corruption.
        if self.directory.exists(email.as_str()).await? {
            tracing::debug!(identifier = email.as_str(), "registration rejected: identifier taken");
            return Ok(false);
        }

        let password = ClearTextPassword::new(input.password)?;
        let hash = password.hash(self.config.pepper())?;

        let mut record = UserRecord::new(email, hash, UserRole::User);
        record.update_profile(input.first_name, input.last_name, input.phone);

        let saved = self.store.save(&record).await?;

        // The directory is a pure projection of the store; a write that
        // it cannot see immediately afterwards means the two surfaces
        // have split.
        if !self.directory.exists(saved.email.as_str()).await? {
            return Err(IdentityError::InconsistentState(format!(
                "account '{}' written but not visible to the login directory",
                saved.email.as_str()
            )));
        }

        tracing::info!(identifier = saved.email.as_str(), "account registered");
        Ok(true)
    }
}
