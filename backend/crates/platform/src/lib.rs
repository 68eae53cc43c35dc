//! Platform - shared infrastructure primitives
//!
//! Cross-domain building blocks with no business logic:
//! - `password`: Argon2id hashing and constant-time verification
//! - `basic_auth`: `Authorization: Basic` header parsing

pub mod basic_auth;
pub mod password;
