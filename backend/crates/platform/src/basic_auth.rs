//! HTTP Basic Authentication header parsing
//!
//! Extracts credentials from `Authorization: Basic <base64>` headers
//! (RFC 7617). The API re-authenticates every request against the user
//! directory, so this is the only credential transport it understands.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderMap;
use http::header::AUTHORIZATION;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors from Basic credential extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasicAuthError {
    /// No Authorization header on the request
    #[error("Missing Authorization header")]
    MissingHeader,

    /// Authorization header does not use the Basic scheme
    #[error("Authorization scheme is not Basic")]
    InvalidScheme,

    /// Credentials are not valid base64 or UTF-8
    #[error("Invalid credential encoding")]
    InvalidEncoding,

    /// Decoded credentials are not `user:password`
    #[error("Malformed Basic credentials")]
    Malformed,
}

/// Credentials decoded from a Basic Authorization header
///
/// The password is zeroized on drop; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Extract Basic credentials from request headers.
///
/// The username may contain any character except `:` (RFC 7617); the
/// password may contain `:`, so only the first colon splits.
pub fn extract_basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, BasicAuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(BasicAuthError::MissingHeader)?
        .to_str()
        .map_err(|_| BasicAuthError::InvalidEncoding)?;

    let encoded = header
        .strip_prefix("Basic ")
        .or_else(|| header.strip_prefix("basic "))
        .ok_or(BasicAuthError::InvalidScheme)?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| BasicAuthError::InvalidEncoding)?;

    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidEncoding)?;

    let (username, password) = decoded.split_once(':').ok_or(BasicAuthError::Malformed)?;

    if username.is_empty() {
        return Err(BasicAuthError::Malformed);
    }

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Build a `WWW-Authenticate` challenge value for 401 responses.
pub fn challenge(realm: &str) -> String {
    format!("Basic realm=\"{}\", charset=\"UTF-8\"", realm)
}
