//! Entity-DTO mappers.

use crate::dto::{PublicUserDto, UserView, VenueAdminView, VenuePage, VenuePageView, VenueView};
use booking_core::{User, Venue};

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

impl From<User> for PublicUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

impl From<Venue> for VenueView {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            location: venue.location,
            capacity: venue.capacity,
            description: venue.description,
        }
    }
}

impl From<Venue> for VenueAdminView {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            location: venue.location,
            capacity: venue.capacity,
            description: venue.description,
            created_by: venue.created_by,
        }
    }
}

impl From<VenuePage> for VenuePageView {
    fn from(page: VenuePage) -> Self {
        Self {
            limit: page.limit,
            page: page.page,
            venues: page.venues.into_iter().map(VenueView::from).collect(),
            total: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::{UserRole, VenueDetails};

    #[test]
    fn test_user_view_drops_credentials() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$argon2id$hash".to_string(),
            Some(UserRole::User),
        );
        let id = user.id;

        let json = serde_json::to_string(&UserView::from(user.clone())).unwrap();
        assert!(!json.contains("argon2"));

        let public = PublicUserDto::from(user);
        assert_eq!(public.id, id);
        assert_eq!(public.username, "alice");
    }

    #[test]
    fn test_venue_page_view() {
        let creator = booking_core::UserId::new();
        let venue = Venue::new(
            VenueDetails {
                name: "Skyline".to_string(),
                location: "Baku".to_string(),
                capacity: 100,
                description: "Roof".to_string(),
            },
            creator,
        );
        let page = VenuePage {
            limit: 10,
            page: 1,
            venues: vec![venue.clone()],
            total: 1,
        };

        let view = VenuePageView::from(page);
        assert_eq!(view.venues[0].id, venue.id);
        assert_eq!(view.total, 1);
        assert_eq!(VenueAdminView::from(venue).created_by, creator);
    }
}
