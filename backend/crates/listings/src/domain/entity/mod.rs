pub mod ad;
pub mod comment;
