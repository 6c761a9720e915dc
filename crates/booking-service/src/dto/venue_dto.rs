//! Venue-related DTOs.

use booking_core::{UserId, Venue, VenueDetails, VenueId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Venue body for create and full update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VenueInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,

    pub capacity: i32,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

impl From<VenueInput> for VenueDetails {
    fn from(input: VenueInput) -> Self {
        Self {
            name: input.name,
            location: input.location,
            capacity: input.capacity,
            description: input.description,
        }
    }
}

/// Venue list query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VenueQuery {
    #[validate(range(min = 0, message = "limit must not be negative"))]
    pub limit: Option<i64>,
    pub page: Option<i64>,
    pub location: Option<String>,
}

/// One page of venues, memoized verbatim per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenuePage {
    pub limit: i64,
    pub page: i64,
    pub venues: Vec<Venue>,
    pub total: i64,
}

/// Venue representation returned to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueView {
    pub id: VenueId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub description: String,
}

/// Venue representation returned to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueAdminView {
    pub id: VenueId,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub description: String,
    pub created_by: UserId,
}

/// Venue list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenuePageView {
    pub limit: i64,
    pub page: i64,
    pub venues: Vec<VenueView>,
    pub total: i64,
}
