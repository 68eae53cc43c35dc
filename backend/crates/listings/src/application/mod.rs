pub mod ads;
pub mod comments;
