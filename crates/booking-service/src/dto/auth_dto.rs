//! Authentication-related DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request.
///
/// Missing fields deserialize as empty strings; the service rejects them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 15, message = "Username must be 1-15 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let request = RegisterRequest {
            username: "newuser".to_string(),
            email: "new@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_username_too_long() {
        let request = RegisterRequest {
            username: "a".repeat(16),
            email: "new@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let request = RegisterRequest {
            username: "newuser".to_string(),
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        let request: LoginRequest = serde_json::from_str(r#"{"email":"a@b.io"}"#).unwrap();
        assert_eq!(request.email, "a@b.io");
        assert!(request.password.is_empty());
    }
}
