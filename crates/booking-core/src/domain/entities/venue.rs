//! Venue entity and its list filter.

use crate::{Pagination, UserId, VenueId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub description: String,
    /// The user that created the venue.
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable fields of a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueDetails {
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub description: String,
}

impl Venue {
    /// Creates a new venue owned by `created_by`.
    #[must_use]
    pub fn new(details: VenueDetails, created_by: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: VenueId::new(),
            name: details.name,
            location: details.location,
            capacity: details.capacity,
            description: details.description,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces all editable fields.
    pub fn replace_details(&mut self, details: VenueDetails) {
        self.name = details.name;
        self.location = details.location;
        self.capacity = details.capacity;
        self.description = details.description;
        self.updated_at = Utc::now();
    }
}

/// Normalized list query for venues.
///
/// The serialized form of this struct is the memoization key for list
/// results, so field order is part of its contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueFilter {
    pub limit: i64,
    pub page: i64,
    pub location: Option<String>,
}

impl VenueFilter {
    /// Builds a filter, defaulting the limit to `default_limit` and the page to 1.
    #[must_use]
    pub fn new(
        limit: Option<i64>,
        page: Option<i64>,
        location: Option<String>,
        default_limit: i64,
    ) -> Self {
        Self {
            limit: limit.filter(|l| *l != 0).unwrap_or(default_limit),
            page: page.filter(|p| *p != 0).unwrap_or(Pagination::DEFAULT_PAGE),
            location: location.filter(|l| !l.is_empty()),
        }
    }

    /// Returns the row window for this filter.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::details(Some(self.limit), Some(self.page))
    }
}
