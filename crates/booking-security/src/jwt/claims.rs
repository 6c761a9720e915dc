//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadData {
    /// User ID.
    pub id: String,
    /// Login subject: the mobile phone when present, otherwise the email.
    pub email: String,
}

/// Decoded token claims: `{ data: { id, email }, iat, exp }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub data: PayloadData,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl TokenPayload {
    /// Creates claims issued now and expiring at `expires_at`.
    #[must_use]
    pub fn new(id: String, email: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            data: PayloadData { id, email },
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID string.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.data.id
    }
}

/// Token kind. Each kind has its own secret and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_payload_wire_shape() {
        let payload = TokenPayload::new(
            "u-1".to_string(),
            "a@b.io".to_string(),
            Utc::now() + Duration::minutes(5),
        );
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["data"]["id"], "u-1");
        assert_eq!(json["data"]["email"], "a@b.io");
        assert!(json["exp"].as_i64().unwrap() > json["iat"].as_i64().unwrap());
    }
}
