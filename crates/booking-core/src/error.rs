//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Detail rendered for faults whose message must not reach the client.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Unified error type for the booking API.
///
/// The first block mirrors the HTTP-facing taxonomy that services raise.
/// The infrastructure block is produced by repositories, configuration and
/// wiring code, and always renders as a server fault.
#[derive(Error, Debug)]
pub enum BookingError {
    // ============ Domain Errors ============
    /// Malformed or missing input.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid or expired credential, or wrong password.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but the role is insufficient.
    #[error("{0}")]
    Forbidden(String),

    /// Entity absent.
    #[error("{resource_type} with id {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Uniqueness violation.
    #[error("{0}")]
    Conflict(String),

    /// The request did not finish within the server's time limit.
    #[error("{0}")]
    Timeout(String),

    /// Catch-all for internal or unexpected failures.
    #[error("{0}")]
    General(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::Timeout(_) => 408,
            Self::General(_) | Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the human-readable title rendered next to the detail.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad Request",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Forbidden(_) => "Forbidden",
            Self::NotFound { .. } => "Not Found",
            Self::Conflict(_) => "Conflict",
            Self::Timeout(_) => "Request Timeout",
            Self::General(_) | Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => {
                INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the message that may be shown to a client.
    ///
    /// Infrastructure errors carry driver or file-system text, so they are
    /// replaced by a generic detail.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => {
                INTERNAL_SERVER_ERROR.to_string()
            }
            Self::General(msg) if msg.is_empty() => INTERNAL_SERVER_ERROR.to_string(),
            _ => self.to_string(),
        }
    }

    /// Creates a bad request error.
    #[must_use]
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        Self::BadRequest(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a request timeout error.
    #[must_use]
    pub fn timeout<T: Into<String>>(message: T) -> Self {
        Self::Timeout(message.into())
    }

    /// Creates a general error with the default detail.
    #[must_use]
    pub fn general() -> Self {
        Self::General(INTERNAL_SERVER_ERROR.to_string())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is a store or wiring fault rather than a domain outcome.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(db_err.message().to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Error body rendered by the HTTP layer.
///
/// ```json
/// {"errors":[{"detail":"...","source":"/api/users","status":404,"title":"Not Found"}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorDetail>,
}

/// A single rendered error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message
    pub detail: String,
    /// Original request path
    pub source: String,
    /// HTTP status code
    pub status: u16,
    /// Short title for the status
    pub title: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `BookingError`.
    #[must_use]
    pub fn from_error(error: &BookingError, source: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorDetail {
                detail: error.detail(),
                source: source.into(),
                status: error.status_code(),
                title: error.title().to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(BookingError::bad_request("missing").status_code(), 400);
        assert_eq!(BookingError::unauthorized("no token").status_code(), 401);
        assert_eq!(BookingError::forbidden("no role").status_code(), 403);
        assert_eq!(BookingError::not_found("User", 1).status_code(), 404);
        assert_eq!(BookingError::conflict("duplicate").status_code(), 409);
        assert_eq!(BookingError::timeout("slow").status_code(), 408);
        assert_eq!(BookingError::general().status_code(), 500);
        assert_eq!(BookingError::Database("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_titles() {
        assert_eq!(BookingError::not_found("Venue", "x").title(), "Not Found");
        assert_eq!(BookingError::general().title(), INTERNAL_SERVER_ERROR);
        assert_eq!(BookingError::timeout("slow").title(), "Request Timeout");
        assert_eq!(BookingError::Internal("x".to_string()).title(), INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_detail_hides_infrastructure_text() {
        let err = BookingError::Database("connection refused at 10.0.0.4".to_string());
        assert_eq!(err.detail(), INTERNAL_SERVER_ERROR);

        let err = BookingError::conflict("User exists");
        assert_eq!(err.detail(), "User exists");
    }

    #[test]
    fn test_not_found_message() {
        let err = BookingError::not_found("User", "abc");
        assert_eq!(err.to_string(), "User with id abc not found");
    }

    #[test]
    fn test_is_fault() {
        assert!(BookingError::Database("x".to_string()).is_fault());
        assert!(!BookingError::not_found("User", 1).is_fault());
        assert!(!BookingError::general().is_fault());
    }

    #[test]
    fn test_error_response_shape() {
        let err = BookingError::forbidden("Not authorized");
        let response = ErrorResponse::from_error(&err, "/api/users");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "errors": [{
                    "detail": "Not authorized",
                    "source": "/api/users",
                    "status": 403,
                    "title": "Forbidden"
                }]
            })
        );
    }
}
