use crate::{UserRepository, VenueRepository};
use booking_core::{BookingError, BookingResult, Pagination, VenueId};
use booking_core::{Venue, VenueDetails, VenueFilter};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory venue repository.
///
/// Creator existence is checked against the user repository it is built
/// with.
pub struct InMemoryVenueRepository {
    venues: Mutex<HashMap<VenueId, Venue>>,
    users: Arc<dyn UserRepository>,
}

impl InMemoryVenueRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            venues: Mutex::new(HashMap::new()),
            users,
        }
    }

    /// Seeds a venue directly, bypassing the creator check.
    pub fn insert(&self, venue: Venue) {
        self.venues.lock().insert(venue.id, venue);
    }

    /// Returns the number of stored venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.lock().len()
    }

    /// Checks whether no venue is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.lock().is_empty()
    }

    fn matching(&self, filter: &VenueFilter) -> Vec<Venue> {
        let mut venues: Vec<Venue> = self
            .venues
            .lock()
            .values()
            .filter(|v| filter.location.as_ref().map_or(true, |l| &v.location == l))
            .cloned()
            .collect();
        venues.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        venues
    }
}

#[async_trait]
impl VenueRepository for InMemoryVenueRepository {
    async fn count(&self, filter: &VenueFilter) -> BookingResult<i64> {
        Ok(i64::try_from(self.matching(filter).len()).unwrap_or(i64::MAX))
    }

    async fn find_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>> {
        Ok(self.venues.lock().get(&id).cloned())
    }

    async fn find_many(
        &self,
        filter: &VenueFilter,
        pagination: Pagination,
    ) -> BookingResult<Vec<Venue>> {
        let skip = usize::try_from(pagination.skip).unwrap_or(0);
        let limit = usize::try_from(pagination.limit).unwrap_or(0);
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect())
    }

    async fn delete_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>> {
        Ok(self.venues.lock().remove(&id))
    }

    async fn save(&self, venue: &Venue) -> BookingResult<Venue> {
        if self.users.find_by_id(venue.created_by).await?.is_none() {
            return Err(BookingError::conflict(format!(
                "Venue creator {} does not exist",
                venue.created_by
            )));
        }
        self.venues.lock().insert(venue.id, venue.clone());
        Ok(venue.clone())
    }

    async fn update_by_id(
        &self,
        id: VenueId,
        details: &VenueDetails,
    ) -> BookingResult<Option<Venue>> {
        let mut venues = self.venues.lock();
        Ok(venues.get_mut(&id).map(|venue| {
            venue.replace_details(details.clone());
            venue.updated_at = Utc::now();
            venue.clone()
        }))
    }
}
