//! Classified Ads & Comments
//!
//! Ad and comment CRUD for the classifieds backend. Authorization is
//! delegated to the identity crate: owners and admins mutate, everyone
//! reads.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use domain::entity::ad::Ad;
pub use domain::entity::comment::Comment;
pub use domain::repository::{AdRepository, CommentRepository};
pub use error::{ListingsError, ListingsResult};
