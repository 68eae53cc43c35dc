//! User Account Entity
//!
//! The single authoritative record for an account: credential material,
//! profile fields and the assigned role all live here. Every read model
//! (the login directory included) is a projection of this entity.

use crate::domain::value_object::email::Email;
use crate::domain::value_object::user_role::UserRole;
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_ref: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(email: Email, password_hash: HashedPassword, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            password_hash,
            first_name: None,
            last_name: None,
            phone: None,
            avatar_ref: None,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored credential. Role and profile are untouched.
    pub fn set_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.touch();
    }

    pub fn update_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        phone: Option<String>,
    ) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.phone = phone;
        self.touch();
    }

    pub fn set_avatar_ref(&mut self, avatar_ref: Option<String>) {
        self.avatar_ref = avatar_ref;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
