//! # Booking Repository
//!
//! Data access for users and venues.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn VenueRepository>
//! MySqlUserRepository, MySqlVenueRepository
//!   ↓  in_transaction for multi-statement writes
//! MySQL
//! ```
//!
//! Every operation separates a store fault (`Err`) from absence
//! (`Ok(None)`). The [`memory`] module holds map-backed implementations of
//! the same traits.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;
pub mod transaction;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
pub use transaction::*;
