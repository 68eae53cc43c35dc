//! Login Use-Case
//!
//! Verifies a presented password against the stored credential. The
//! outcome is a plain boolean: any expected rejection (unknown account,
//! wrong password, malformed input) reads as `false`, while state
//! corruption and infrastructure failures propagate as errors.

use crate::application::config::IdentityConfig;
use crate::application::directory::UserDirectory;
use crate::application::flow_outcome;
use crate::domain::repository::UserStore;
use crate::error::IdentityResult;
use platform::password::ClearTextPassword;
use std::sync::Arc;

pub struct LoginUseCase<S> {
    directory: UserDirectory<S>,
    config: Arc<IdentityConfig>,
}

impl<S> Clone for LoginUseCase<S> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: UserStore + Sync> LoginUseCase<S> {
    pub fn new(directory: UserDirectory<S>, config: Arc<IdentityConfig>) -> Self {
        Self { directory, config }
    }

    pub async fn execute(&self, identifier: &str, password: String) -> IdentityResult<bool> {
        flow_outcome(self.attempt(identifier, password).await)
    }

    async fn attempt(&self, identifier: &str, password: String) -> IdentityResult<bool> {
        if !self.directory.exists(identifier).await? {
            tracing::debug!(identifier, "login rejected: unknown identifier");
            return Ok(false);
        }

        let view = self.directory.load_by_identifier(identifier).await?;
        let presented = ClearTextPassword::for_verification(password);
        let verified = view.password_hash.verify(&presented, self.config.pepper());

        if !verified {
            tracing::debug!(identifier, "login rejected: password mismatch");
        }
        Ok(verified)
    }
}
