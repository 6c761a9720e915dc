//! Venue list query extractor.

use crate::responses::AppError;
use booking_core::{BookingError, ValidateExt};
use booking_service::VenueQuery;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

/// `?limit=&page=&location=` for venue listings.
///
/// A query string that does not parse, or a negative `limit`, is a bad
/// request.
#[derive(Debug, Clone, Default)]
pub struct VenueListQuery(pub VenueQuery);

#[async_trait]
impl<S> FromRequestParts<S> for VenueListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<VenueQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(BookingError::bad_request(rejection.body_text())))?;
        query.validate_request()?;
        Ok(Self(query))
    }
}
