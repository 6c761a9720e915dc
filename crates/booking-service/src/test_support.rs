//! Shared fixtures for service tests.

use crate::cache::{CacheInterface, LruCache};
use booking_config::{CacheConfig, SecurityConfig};
use booking_core::{
    BookingResult, CacheInvalidator, Pagination, User, UserId, UserRole, Venue, VenueDetails,
    VenueFilter, VenueId,
};
use booking_repository::{UserRepository, VenueRepository};
use booking_security::{PasswordHasher, PasswordHasherInterface, TokenProvider};
use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;

mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_all(&self) -> BookingResult<Vec<User>>;
        async fn find_by_email(&self, email: &str) -> BookingResult<Option<User>>;
        async fn find_by_email_or_username(
            &self,
            email: &str,
            username: &str,
        ) -> BookingResult<Option<User>>;
        async fn find_by_id(&self, id: UserId) -> BookingResult<Option<User>>;
        async fn save(&self, user: &User) -> BookingResult<User>;
    }
}

mock! {
    pub VenueRepo {}

    #[async_trait]
    impl VenueRepository for VenueRepo {
        async fn count(&self, filter: &VenueFilter) -> BookingResult<i64>;
        async fn find_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>>;
        async fn find_many(
            &self,
            filter: &VenueFilter,
            pagination: Pagination,
        ) -> BookingResult<Vec<Venue>>;
        async fn delete_by_id(&self, id: VenueId) -> BookingResult<Option<Venue>>;
        async fn save(&self, venue: &Venue) -> BookingResult<Venue>;
        async fn update_by_id(
            &self,
            id: VenueId,
            details: &VenueDetails,
        ) -> BookingResult<Option<Venue>>;
    }
}

mock! {
    pub Cache {}

    #[async_trait]
    impl CacheInvalidator for Cache {
        async fn flush(&self);
    }

    #[async_trait]
    impl CacheInterface for Cache {
        async fn get_raw(&self, key: &str) -> Option<String>;
        async fn set_raw(&self, key: &str, value: String);
        async fn entry_count(&self) -> u64;
    }
}

/// Argon2 with a small memory cost so tests stay fast.
pub fn hasher() -> Arc<PasswordHasher> {
    Arc::new(PasswordHasher::with_cost(1024))
}

pub fn security_config() -> SecurityConfig {
    SecurityConfig {
        access_token_secret: "test-access-secret".to_string(),
        access_token_expiration_secs: 60,
        refresh_token_secret: "test-refresh-secret".to_string(),
        refresh_token_expiration_secs: 120,
    }
}

pub fn token_provider() -> Arc<TokenProvider> {
    Arc::new(TokenProvider::new(&security_config()))
}

pub fn cache() -> Arc<LruCache> {
    Arc::new(LruCache::new(&CacheConfig::default()).unwrap())
}

/// Builds a user whose stored hash matches `password`.
pub fn user_with_password(
    hasher: &dyn PasswordHasherInterface,
    email: &str,
    password: &str,
    role: UserRole,
) -> User {
    let username = email.split('@').next().unwrap_or(email).to_string();
    User::new(
        username,
        email.to_string(),
        hasher.hash(password).unwrap(),
        Some(role),
    )
}

pub fn venue_details(name: &str, location: &str) -> VenueDetails {
    VenueDetails {
        name: name.to_string(),
        location: location.to_string(),
        capacity: 80,
        description: "Hall with a stage".to_string(),
    }
}
