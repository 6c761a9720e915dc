//! Authenticated principal extractor.

use crate::responses::AppError;
use booking_core::{BookingError, User};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// The user admitted by the role gate.
///
/// Only usable on gated routes; elsewhere extraction fails with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError(BookingError::unauthorized("Not authorized")))
    }
}
