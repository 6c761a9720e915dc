//! User entity.

use crate::{UserId, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `password_hash` is an argon2 PHC string. The entity itself is internal:
/// HTTP responses go through view types that never carry the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username, 1 to 15 characters.
    pub username: String,

    /// Unique email address, 4 to 256 characters.
    pub email: String,

    /// Hashed password.
    pub password_hash: String,

    /// Role, if one was assigned.
    pub role: Option<UserRole>,

    /// User's first name.
    pub first_name: Option<String>,

    /// User's last name.
    pub last_name: Option<String>,

    /// Mobile phone, preferred over email as the token subject when present.
    pub mobile_phone: Option<String>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given details.
    #[must_use]
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        role: Option<UserRole>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            role,
            first_name: None,
            last_name: None,
            mobile_phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash.
    pub fn change_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Returns the identity embedded in issued tokens.
    #[must_use]
    pub fn token_subject(&self) -> &str {
        self.mobile_phone
            .as_deref()
            .filter(|phone| !phone.is_empty())
            .unwrap_or(&self.email)
    }

    /// Checks if the user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Some(UserRole::Admin))
    }
}
