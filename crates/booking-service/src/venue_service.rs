//! Venue service trait definition.

use crate::dto::{VenueInput, VenuePage, VenueQuery};
use booking_core::{BookingResult, Interface, User, Venue};
use async_trait::async_trait;

/// Venue service trait.
///
/// Absent venues surface as `General`, same as store faults.
#[async_trait]
pub trait VenueService: Interface + Send + Sync {
    /// Creates a venue owned by `creator`.
    async fn add_venue(&self, input: VenueInput, creator: &User) -> BookingResult<Venue>;

    /// Gets a venue by ID.
    async fn get_venue_by_id(&self, id: &str) -> BookingResult<Venue>;

    /// Lists one page of venues. Results are memoized per query.
    async fn get_many_venues(&self, query: VenueQuery) -> BookingResult<VenuePage>;

    /// Replaces a venue's details.
    async fn modify_venue(&self, id: &str, input: VenueInput) -> BookingResult<Venue>;

    /// Deletes a venue and returns it.
    async fn remove_venue(&self, id: &str) -> BookingResult<Venue>;
}
