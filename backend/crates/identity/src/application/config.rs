//! Identity configuration

/// Settings shared by the authentication use-cases and the HTTP layer.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Realm announced in `WWW-Authenticate` challenges
    pub realm: String,
    /// Optional server-side pepper mixed into password hashing
    pub password_pepper: Option<Vec<u8>>,
}

impl IdentityConfig {
    pub fn new(realm: impl Into<String>, password_pepper: Option<Vec<u8>>) -> Self {
        Self {
            realm: realm.into(),
            password_pepper,
        }
    }

    #[inline]
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            realm: "classifieds".to_string(),
            password_pepper: None,
        }
    }
}
