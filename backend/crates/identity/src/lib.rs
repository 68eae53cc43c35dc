//! Identity & Access Control
//!
//! Accounts, credentials and authorization for the classifieds backend.
//! One consolidated store holds every account; the login directory and
//! the profile surface are projections of it.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::IdentityConfig;
pub use application::directory::{PrincipalInput, PrincipalView, UserDirectory};
pub use application::policy::AccessPolicy;
pub use domain::entity::user::UserRecord;
pub use domain::principal::Principal;
pub use domain::repository::UserStore;
pub use domain::value_object::email::Email;
pub use domain::value_object::user_role::UserRole;
pub use error::{IdentityError, IdentityResult};
