//! User Store Port
//!
//! One consolidated store backs both the account profile surface and the
//! login directory. Lookups by email are exact and case-sensitive: the
//! identifier stored at registration is the identifier that must be
//! presented at login, byte for byte.

use crate::domain::entity::user::UserRecord;
use crate::error::IdentityResult;
use kernel::id::UserId;

#[trait_variant::make(UserStore: Send)]
pub trait LocalUserStore {
    /// Exact-match lookup by login identifier.
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<UserRecord>>;

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<UserRecord>>;

    /// Upsert keyed on the record id. Email uniqueness is enforced here;
    /// a save that would collide with another account's email fails with
    /// `EmailTaken`.
    async fn save(&self, record: &UserRecord) -> IdentityResult<UserRecord>;

    /// Remove the account with this exact email. Deleting an absent
    /// account is not an error.
    async fn delete_by_email(&self, email: &str) -> IdentityResult<()>;
}
