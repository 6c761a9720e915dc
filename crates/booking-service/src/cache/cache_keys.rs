//! Cache key generators for consistent key naming.

use booking_core::{BookingResult, UserId, VenueFilter};
use sha2::{Digest, Sha256};

/// Prefix for memoized user lookups.
const USER_PREFIX: &str = "USER";

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user_key(id: UserId) -> String {
    format!("{}-{}", USER_PREFIX, id)
}

/// Generate a cache key for a venue list query.
///
/// The key is the hex SHA-256 of the filter's JSON form, so equal filters
/// share one entry.
pub fn venue_query_key(filter: &VenueFilter) -> BookingResult<String> {
    let canonical = serde_json::to_vec(filter)?;
    Ok(hex::encode(Sha256::digest(&canonical)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_key() {
        let id = UserId::new();
        assert_eq!(user_key(id), format!("USER-{}", id));
    }

    #[test]
    fn test_venue_query_key_is_deterministic() {
        let a = VenueFilter::new(Some(5), Some(2), Some("Baku".to_string()), 10);
        let b = VenueFilter::new(Some(5), Some(2), Some("Baku".to_string()), 10);
        let c = VenueFilter::new(Some(5), Some(3), Some("Baku".to_string()), 10);

        let key = venue_query_key(&a).unwrap();
        assert_eq!(key.len(), 64);
        assert_eq!(key, venue_query_key(&b).unwrap());
        assert_ne!(key, venue_query_key(&c).unwrap());
    }

    #[test]
    fn test_defaulted_filters_share_a_key() {
        let omitted = VenueFilter::new(None, None, None, 10);
        let explicit = VenueFilter::new(Some(10), Some(1), None, 10);
        assert_eq!(
            venue_query_key(&omitted).unwrap(),
            venue_query_key(&explicit).unwrap()
        );
    }
}
