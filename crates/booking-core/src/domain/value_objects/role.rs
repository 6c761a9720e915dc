//! User role value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user may hold.
///
/// `Admin` is a superuser role: it satisfies every role requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Administrator with full access.
    Admin,
    /// Regular user.
    #[default]
    User,
}

impl UserRole {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    /// Checks whether this role passes a gate that requires `required`.
    #[must_use]
    pub const fn satisfies(&self, required: Self) -> bool {
        matches!((self, required), (Self::Admin, _) | (Self::User, Self::User))
    }

    /// Returns all available roles.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Admin, Self::User]
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_satisfies_every_role() {
        assert!(UserRole::Admin.satisfies(UserRole::Admin));
        assert!(UserRole::Admin.satisfies(UserRole::User));
    }

    #[test]
    fn test_user_satisfies_only_user() {
        assert!(UserRole::User.satisfies(UserRole::User));
        assert!(!UserRole::User.satisfies(UserRole::Admin));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("USER".parse::<UserRole>().unwrap(), UserRole::User);
        assert!("moderator".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
    }
}
