//! User-related DTOs.

use booking_core::{UserId, UserRole};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, max = 15, message = "Username must be 1-15 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Defaults to `USER` when omitted.
    pub role: Option<UserRole>,

    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

/// Request to change password.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(
        required(message = "Invalid request"),
        length(min = 1, message = "Invalid request")
    )]
    pub old_password: Option<String>,

    #[validate(
        required(message = "Invalid request"),
        length(min = 1, message = "Invalid request")
    )]
    pub new_password: Option<String>,
}

/// User representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Public registration result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUserDto {
    pub id: UserId,
    pub username: String,
    pub email: String,
}
