//! Login Directory
//!
//! Read/write facade over the consolidated user store, shaped for the
//! authentication pipeline: it deals in login identifiers, password
//! hashes and granted authorities, never in profile data. It keeps no
//! state of its own, so it can never drift from the accounts it
//! projects.

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::UserStore;
use crate::domain::value_object::email::Email;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{IdentityError, IdentityResult};
use platform::password::HashedPassword;
use std::sync::Arc;

/// Credential projection of a single account.
#[derive(Debug, Clone)]
pub struct PrincipalView {
    pub identifier: String,
    pub password_hash: HashedPassword,
    pub authority: String,
}

/// Input for directory-level account creation. Authorities carry the
/// `ROLE_` prefix, matching what the pipeline hands back out.
#[derive(Debug, Clone)]
pub struct PrincipalInput {
    pub identifier: String,
    pub password_hash: HashedPassword,
    pub authorities: Vec<String>,
}

pub struct UserDirectory<S> {
    store: Arc<S>,
}

impl<S> Clone for UserDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: UserStore + Sync> UserDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load the credential projection for an exact login identifier.
    pub async fn load_by_identifier(&self, identifier: &str) -> IdentityResult<PrincipalView> {
        let record = self
            .store
            .find_by_email(identifier)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        Ok(PrincipalView {
            identifier: record.email.as_str().to_string(),
            authority: record.role.authority().to_string(),
            password_hash: record.password_hash,
        })
    }

    /// Presence check without materializing credential material.
    pub async fn exists(&self, identifier: &str) -> IdentityResult<bool> {
        Ok(self.store.find_by_email(identifier).await?.is_some())
    }

    /// Create an account from a credential projection. The first granted
    /// authority determines the role; anything that does not carry the
    /// `ROLE_` prefix or does not decode to a known role is rejected.
    pub async fn create(&self, input: PrincipalInput) -> IdentityResult<UserRecord> {
        let authority = input
            .authorities
            .first()
            .ok_or_else(|| IdentityError::InvalidAuthority("<none>".to_string()))?;
        let role = UserRole::from_authority(authority)?;
        let email = Email::new(input.identifier)?;

        let record = UserRecord::new(email, input.password_hash, role);
        self.store.save(&record).await
    }

    /// Credential updates are not served here; they go through the
    /// password change flows, which re-hash and re-validate.
    pub async fn update(&self, _input: PrincipalInput) -> IdentityResult<()> {
        Err(IdentityError::UnsupportedOperation(
            "credential updates go through the password change flows",
        ))
    }

    pub async fn delete(&self, identifier: &str) -> IdentityResult<()> {
        self.store.delete_by_email(identifier).await
    }
}
