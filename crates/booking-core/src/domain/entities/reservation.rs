//! Reservation entity.

use crate::{ReservationId, UserId, VenueId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A booking of a venue by a user.
///
/// Persisted in its own table with foreign keys to users and venues. No
/// service exposes it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub date: DateTime<Utc>,
    pub time: Option<String>,
    pub number_of_people: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a reservation for `date`.
    #[must_use]
    pub fn new(user_id: UserId, venue_id: VenueId, date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: ReservationId::new(),
            user_id,
            venue_id,
            date,
            time: None,
            number_of_people: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leaves_optional_fields_empty() {
        let date = Utc::now();
        let reservation = Reservation::new(UserId::new(), VenueId::new(), date);
        assert_eq!(reservation.date, date);
        assert!(reservation.time.is_none());
        assert!(reservation.number_of_people.is_none());
    }
}
