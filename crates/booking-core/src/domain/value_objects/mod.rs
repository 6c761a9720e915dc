//! Value objects.

mod role;

pub use role::UserRole;
