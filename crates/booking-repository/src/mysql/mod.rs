//! MySQL repository implementations.

mod user_repository;
mod venue_repository;

pub use user_repository::*;
pub use venue_repository::*;
