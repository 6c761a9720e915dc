//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod user_service_impl;
pub mod venue_service_impl;

pub use user_service_impl::UserServiceImpl;
pub use venue_service_impl::{VenueServiceImpl, VenueServiceImplParameters, DEFAULT_QUERY_LIMIT};
