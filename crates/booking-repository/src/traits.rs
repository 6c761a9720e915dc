//! Repository trait definitions.

use booking_core::{BookingResult, Interface, Pagination, UserId, VenueId};
use booking_core::{User, Venue, VenueDetails, VenueFilter};
use async_trait::async_trait;

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Lists every user.
    async fn find_all(&self) -> BookingResult<Vec<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> BookingResult<Option<User>>;

    /// Finds a user holding either the email or the username.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> BookingResult<Option<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> BookingResult<Option<User>>;

    /// Inserts a new user or updates an existing one, then returns the
    /// stored row. Flushes the injected cache on success.
    async fn save(&self, user: &User) -> BookingResult<User>;
}

/// Venue repository trait.
#[async_trait]
pub trait VenueRepository: Interface + Send + Sync {
    /// Counts venues matching the filter's location.
    async fn count(&self, filter: &VenueFilter) -> BookingResult<i64>;

    /// Finds a venue by ID.
    async fn find_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>>;

    /// Lists venues matching the filter within the row window.
    async fn find_many(
        &self,
        filter: &VenueFilter,
        pagination: Pagination,
    ) -> BookingResult<Vec<Venue>>;

    /// Deletes a venue and returns it.
    async fn delete_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>>;

    /// Inserts a venue. The creator must exist.
    async fn save(&self, venue: &Venue) -> BookingResult<Venue>;

    /// Replaces the editable fields of a venue and returns the updated row.
    async fn update_by_id(
        &self,
        id: VenueId,
        details: &VenueDetails,
    ) -> BookingResult<Option<Venue>>;
}
