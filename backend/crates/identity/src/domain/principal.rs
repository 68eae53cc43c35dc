//! Authenticated Principal
//!
//! Carried through the request pipeline once credentials have been
//! verified. Holds the login identifier and the set of granted
//! authorities; authorization decisions never touch credential material.

use crate::domain::value_object::user_role::UserRole;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    identifier: String,
    authorities: HashSet<String>,
}

impl Principal {
    pub fn new(identifier: impl Into<String>, authorities: impl IntoIterator<Item = String>) -> Self {
        Self {
            identifier: identifier.into(),
            authorities: authorities.into_iter().collect(),
        }
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn authorities(&self) -> &HashSet<String> {
        &self.authorities
    }

    #[inline]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.has_authority(UserRole::Admin.authority())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_detection() {
        let admin = Principal::new("root@example.com", ["ROLE_ADMIN".to_string()]);
        assert!(admin.is_admin());
        assert!(admin.has_authority("ROLE_ADMIN"));

        let user = Principal::new("user@example.com", ["ROLE_USER".to_string()]);
        assert!(!user.is_admin());
        assert!(user.has_authority("ROLE_USER"));
    }

    #[test]
    fn test_identifier_preserved() {
        let p = Principal::new("MixedCase@Example.com", ["ROLE_USER".to_string()]);
        assert_eq!(p.identifier(), "MixedCase@Example.com");
    }
}
