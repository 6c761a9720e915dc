//! Validation utilities.

use crate::BookingError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `BookingError::BadRequest` on failure.
    fn validate_request(&self) -> Result<(), BookingError> {
        self.validate().map_err(validation_errors_to_booking_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to a bad request carrying the first
/// failing field's message.
#[must_use]
pub fn validation_errors_to_booking_error(errors: ValidationErrors) -> BookingError {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{} is invalid", field), ToString::to_string);
                ((*field).to_string(), message)
            })
        })
        .collect();
    messages.sort();

    let message = messages
        .into_iter()
        .next()
        .map_or_else(|| "Invalid request".to_string(), |(_, message)| message);

    BookingError::BadRequest(message)
}
