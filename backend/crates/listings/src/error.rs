//! Listings Error Taxonomy

use axum::response::{IntoResponse, Response};
use identity::IdentityError;
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

pub type ListingsResult<T> = Result<T, ListingsError>;

#[derive(Debug, Error)]
pub enum ListingsError {
    #[error("ad not found")]
    AdNotFound,

    #[error("comment not found")]
    CommentNotFound,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ListingsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListingsError::AdNotFound | ListingsError::CommentNotFound => ErrorKind::NotFound,
            ListingsError::Validation(_) => ErrorKind::BadRequest,
            ListingsError::Identity(err) => err.kind(),
            ListingsError::Database(_) | ListingsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn log(&self) {
        match self {
            ListingsError::Database(_) | ListingsError::Internal(_) => {
                tracing::error!(error = %self, "listings failure");
            }
            ListingsError::Identity(err) => err.log(),
            _ => tracing::debug!(error = %self, "listings rejection"),
        }
    }

    fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }
}

impl IntoResponse for ListingsError {
    fn into_response(self) -> Response {
        self.to_app_error().into_response()
    }
}
