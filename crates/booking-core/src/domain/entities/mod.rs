//! Domain entities.

mod reservation;
mod user;
mod venue;

pub use reservation::Reservation;
pub use user::User;
pub use venue::{Venue, VenueDetails, VenueFilter};
