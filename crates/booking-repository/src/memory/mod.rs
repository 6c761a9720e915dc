//! Map-backed repositories.
//!
//! They honor the same contracts as the MySQL implementations, including
//! the unique email and username, the creator check on venue insert, and
//! the cache flush after a user write.

mod user;
mod venue;

pub use user::InMemoryUserRepository;
pub use venue::InMemoryVenueRepository;
