//! User Role Value Object
//!
//! Exactly two roles exist: `User` and `Admin`. The authentication
//! subsystem speaks in granted authorities (`ROLE_USER` / `ROLE_ADMIN`);
//! this type is the bridge between the two vocabularies.
//!
//! Decoding is fallible everywhere: an absent or unknown stored value is
//! an error state, never a default.

use crate::error::{IdentityError, IdentityResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix carried by granted authority strings
pub const AUTHORITY_PREFIX: &str = "ROLE_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Stored representation ("USER" / "ADMIN")
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Granted authority representation ("ROLE_USER" / "ROLE_ADMIN")
    #[inline]
    pub const fn authority(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Decode a stored code. `None` for unknown values; the caller decides
    /// how loudly to fail.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Decode a granted authority by stripping the `ROLE_` prefix.
    pub fn from_authority(authority: &str) -> IdentityResult<Self> {
        let code = authority
            .strip_prefix(AUTHORITY_PREFIX)
            .ok_or_else(|| IdentityError::InvalidAuthority(authority.to_string()))?;

        Self::from_code(code).ok_or_else(|| IdentityError::InvalidAuthority(authority.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
