//! Data transfer objects.

mod auth_dto;
mod user_dto;
mod venue_dto;

pub use auth_dto::*;
pub use user_dto::*;
pub use venue_dto::*;
