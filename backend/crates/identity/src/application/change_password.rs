//! Password Change Use-Cases
//!
//! Two flows share one write path:
//! - `ChangePasswordUseCase` is self-service and demands proof of the
//!   current password.
//! - `SetNewPasswordUseCase` overwrites without proof; callers gate it
//!   behind an owner-or-admin check.
//!
//! Both preserve the account's role and profile untouched.

use crate::application::config::IdentityConfig;
use crate::application::directory::UserDirectory;
use crate::application::flow_outcome;
use crate::domain::repository::UserStore;
use crate::error::{IdentityError, IdentityResult};
use platform::password::{ClearTextPassword, HashedPassword};
use std::sync::Arc;

/// Re-hash and persist, keyed by exact identifier.
async fn apply_new_password<S: UserStore + Sync>(
    store: &S,
    identifier: &str,
    hash: HashedPassword,
) -> IdentityResult<()> {
    let mut record = store
        .find_by_email(identifier)
        .await?
        .ok_or(IdentityError::UserNotFound)?;
    record.set_password(hash);
    store.save(&record).await?;
    Ok(())
}

pub struct ChangePasswordUseCase<S> {
    store: Arc<S>,
    directory: UserDirectory<S>,
    config: Arc<IdentityConfig>,
}

impl<S> Clone for ChangePasswordUseCase<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: self.directory.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: UserStore + Sync> ChangePasswordUseCase<S> {
    pub fn new(store: Arc<S>, directory: UserDirectory<S>, config: Arc<IdentityConfig>) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    pub async fn execute(
        &self,
        identifier: &str,
        current_password: String,
        new_password: String,
    ) -> IdentityResult<bool> {
        flow_outcome(self.attempt(identifier, current_password, new_password).await)
    }

    async fn attempt(
        &self,
        identifier: &str,
        current_password: String,
        new_password: String,
    ) -> IdentityResult<bool> {
        if !self.directory.exists(identifier).await? {
            return Ok(false);
        }

        let view = self.directory.load_by_identifier(identifier).await?;
        let presented = ClearTextPassword::for_verification(current_password);
        if !view.password_hash.verify(&presented, self.config.pepper()) {
            tracing::debug!(identifier, "password change rejected: current password mismatch");
            return Ok(false);
        }

        let replacement = ClearTextPassword::new(new_password)?;
        let hash = replacement.hash(self.config.pepper())?;
        apply_new_password(self.store.as_ref(), identifier, hash).await?;

        tracing::info!(identifier, "password changed");
        Ok(true)
    }
}

pub struct SetNewPasswordUseCase<S> {
    store: Arc<S>,
    directory: UserDirectory<S>,
    config: Arc<IdentityConfig>,
}

impl<S> Clone for SetNewPasswordUseCase<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: self.directory.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: UserStore + Sync> SetNewPasswordUseCase<S> {
    pub fn new(store: Arc<S>, directory: UserDirectory<S>, config: Arc<IdentityConfig>) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    pub async fn execute(&self, identifier: &str, new_password: String) -> IdentityResult<bool> {
        flow_outcome(self.attempt(identifier, new_password).await)
    }

    async fn attempt(&self, identifier: &str, new_password: String) -> IdentityResult<bool> {
        if !self.directory.exists(identifier).await? {
            return Ok(false);
        }

        let replacement = ClearTextPassword::new(new_password)?;
        let hash = replacement.hash(self.config.pepper())?;
        apply_new_password(self.store.as_ref(), identifier, hash).await?;

        tracing::info!(identifier, "password reset");
        Ok(true)
    }
}
