//! User service trait definition.

use crate::dto::CreateUser;
use booking_core::{BookingResult, Interface, User};
use async_trait::async_trait;

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a user on behalf of an administrator.
    async fn add_user(&self, request: Option<CreateUser>) -> BookingResult<User>;

    /// Replaces a user's password after checking the old one.
    async fn change_password(&self, id: &str, old_password: &str, new_password: &str)
        -> BookingResult<User>;

    /// Lists every user.
    async fn get_all_users(&self) -> BookingResult<Vec<User>>;

    /// Gets a user by ID, reading through the cache.
    ///
    /// With `tolerate_missing` an absent user is `Ok(None)` instead of
    /// `NotFound`.
    async fn get_user_by_id(&self, id: &str, tolerate_missing: bool)
        -> BookingResult<Option<User>>;
}
