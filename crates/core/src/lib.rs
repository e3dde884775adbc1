//! `stockfile-core` — domain building blocks shared by the inventory crates.
//!
//! This crate contains **pure domain** primitives (no file or terminal IO).

pub mod entity;
pub mod error;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
