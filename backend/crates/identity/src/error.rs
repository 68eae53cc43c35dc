//! Identity Error Types
//!
//! This module provides identity-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Propagation policy: the boolean authentication flows (login, register,
//! password changes) collapse every taxonomy error into `Ok(false)` via
//! [`IdentityError::is_flow_rejection`] — except `InconsistentState` and
//! infrastructure failures, which always propagate as hard errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No user record for the given identifier
    #[error("User not found")]
    UserNotFound,

    /// No resolvable principal on the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Presented credentials did not verify
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Resolved principal lacks permission for the resource
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// A user record with this email already exists
    #[error("Email already registered")]
    EmailTaken,

    /// Malformed or missing authority during directory creation
    #[error("Invalid authority: {0}")]
    InvalidAuthority(String),

    /// Disallowed directory adapter primitive
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// The credential store and directory projection disagree.
    /// Signals data corruption; never converted to a boolean result.
    #[error("Inconsistent identity state: {0}")]
    InconsistentState(String),

    /// Input validation error (email shape etc.)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A boolean flow rejected the request (boundary-level 400)
    #[error("{0}")]
    Rejected(&'static str),

    /// Password policy violation
    #[error("Password validation failed: {0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Password hashing failure
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::UserNotFound => ErrorKind::NotFound,
            IdentityError::Unauthenticated | IdentityError::InvalidCredentials => {
                ErrorKind::Unauthorized
            }
            IdentityError::Forbidden => ErrorKind::Forbidden,
            IdentityError::EmailTaken => ErrorKind::Conflict,
            IdentityError::InvalidAuthority(_)
            | IdentityError::Validation(_)
            | IdentityError::Rejected(_)
            | IdentityError::PasswordPolicy(_) => ErrorKind::BadRequest,
            IdentityError::Database(e) if is_unique_violation(e) => ErrorKind::Conflict,
            IdentityError::UnsupportedOperation(_)
            | IdentityError::InconsistentState(_)
            | IdentityError::PasswordHash(_)
            | IdentityError::Database(_)
            | IdentityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether a boolean authentication flow converts this error into
    /// `Ok(false)` at its boundary.
    ///
    /// `InconsistentState`, hashing and database failures are never
    /// squashed: the first signals corruption, the others are
    /// infrastructure faults the caller must see.
    pub fn is_flow_rejection(&self) -> bool {
        matches!(
            self,
            IdentityError::UserNotFound
                | IdentityError::Unauthenticated
                | IdentityError::InvalidCredentials
                | IdentityError::Forbidden
                | IdentityError::EmailTaken
                | IdentityError::InvalidAuthority(_)
                | IdentityError::UnsupportedOperation(_)
                | IdentityError::Validation(_)
                | IdentityError::Rejected(_)
                | IdentityError::PasswordPolicy(_)
        )
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::InconsistentState(msg) => {
                tracing::error!(message = %msg, "Identity state corruption detected");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::Forbidden => {
                tracing::warn!("Authorization denied");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

/// PostgreSQL unique_violation (duplicate email on the users table)
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(IdentityError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            IdentityError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(IdentityError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(IdentityError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            IdentityError::InvalidAuthority("none".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            IdentityError::InconsistentState("drift".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_flow_rejection_partition() {
        assert!(IdentityError::UserNotFound.is_flow_rejection());
        assert!(IdentityError::InvalidCredentials.is_flow_rejection());
        assert!(IdentityError::EmailTaken.is_flow_rejection());
        assert!(IdentityError::UnsupportedOperation("x").is_flow_rejection());

        // Corruption and infrastructure faults are never squashed
        assert!(!IdentityError::InconsistentState("drift".into()).is_flow_rejection());
        assert!(!IdentityError::Internal("boom".into()).is_flow_rejection());
        assert!(!IdentityError::Database(sqlx::Error::PoolClosed).is_flow_rejection());
    }
}
