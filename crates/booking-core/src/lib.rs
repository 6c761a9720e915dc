//! # Booking Core
//!
//! Core types, domain entities, and error definitions shared by every layer
//! of the venue booking API.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for component interfaces
pub use shaku::Interface;
