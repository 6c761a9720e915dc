//! # Domain
//!
//! Entities and value objects of the booking domain.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
