//! # Booking Service
//!
//! Business logic for the venue booking API. This layer is the single
//! place where repository and helper failures become domain errors.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod user_service;
pub mod venue_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use r#impl::{UserServiceImpl, VenueServiceImpl, VenueServiceImplParameters, DEFAULT_QUERY_LIMIT};
pub use user_service::*;
pub use venue_service::*;
