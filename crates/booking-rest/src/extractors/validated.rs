//! JSON body extractors.
//!
//! Both map a malformed body to `400`. [`ValidatedJson`] additionally runs
//! the `validator` rules and reports the first failing field's message.

use crate::responses::AppError;
use booking_core::{BookingError, ValidateExt};
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with a bad-request rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError(BookingError::bad_request(rejection.body_text())))?;
        Ok(Self(value))
    }
}

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate_request()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use booking_service::VenueInput;

    fn json_request(body: &str) -> Request {
        Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let request = json_request(
            r#"{"name":"Hall","location":"Baku","capacity":10,"description":"Big"}"#,
        );
        let ValidatedJson(input) = ValidatedJson::<VenueInput>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(input.capacity, 10);
    }

    #[tokio::test]
    async fn test_validation_message_is_the_detail() {
        let request = json_request(
            r#"{"name":"","location":"Baku","capacity":10,"description":"Big"}"#,
        );
        let err = ValidatedJson::<VenueInput>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(err.0, BookingError::BadRequest(ref m) if m == "name is required"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = JsonBody::<VenueInput>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.0.status_code(), 400);
    }
}
