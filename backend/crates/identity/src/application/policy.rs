//! Access Policy
//!
//! Authorization answers for the rest of the system: who is the current
//! account, are they an admin, may they touch a given resource. Resource
//! ownership is decided against the author recorded on the resource, not
//! against anything the caller supplies.

use crate::domain::entity::user::UserRecord;
use crate::domain::principal::Principal;
use crate::domain::repository::UserStore;
use crate::error::{IdentityError, IdentityResult};
use kernel::id::UserId;
use std::sync::Arc;

pub struct AccessPolicy<S> {
    store: Arc<S>,
}

impl<S> Clone for AccessPolicy<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: UserStore + Sync> AccessPolicy<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolve the authenticated principal to its account record.
    /// No principal means the request never authenticated; a principal
    /// whose account has vanished is a hard `UserNotFound`.
    pub async fn resolve_current_user(
        &self,
        principal: Option<&Principal>,
    ) -> IdentityResult<UserRecord> {
        let principal = principal.ok_or(IdentityError::Unauthenticated)?;
        self.store
            .find_by_email(principal.identifier())
            .await?
            .ok_or(IdentityError::UserNotFound)
    }

    /// Admin check from granted authorities alone; no store round-trip.
    pub fn is_admin(&self, principal: Option<&Principal>) -> bool {
        principal.is_some_and(Principal::is_admin)
    }

    /// Gate a mutation: the caller must be the resource owner or an
    /// admin. Resolution failures surface as-is, a mismatch is
    /// `Forbidden`.
    pub async fn check_owner_or_admin(
        &self,
        principal: Option<&Principal>,
        resource_owner: &UserRecord,
    ) -> IdentityResult<UserRecord> {
        let current = self.resolve_current_user(principal).await?;

        if current.id == resource_owner.id || self.is_admin(principal) {
            Ok(current)
        } else {
            Err(IdentityError::Forbidden)
        }
    }

    /// Non-throwing ownership probe: `false` for missing resources,
    /// unauthenticated callers and resolution failures alike.
    pub async fn is_owner(
        &self,
        principal: Option<&Principal>,
        owner_id: Option<&UserId>,
    ) -> bool {
        let Some(owner_id) = owner_id else {
            return false;
        };
        match self.resolve_current_user(principal).await {
            Ok(current) => current.id == *owner_id,
            Err(_) => false,
        }
    }
}
