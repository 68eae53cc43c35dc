pub mod entity;
pub mod principal;
pub mod repository;
pub mod value_object;
