pub mod app;

mod builder;
pub use builder::Builder;

pub mod db;

pub mod mapping;
pub use mapping::{PropertyMapping, TableMapping};

mod verify;
