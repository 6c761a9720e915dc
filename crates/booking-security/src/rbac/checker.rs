//! Role checks for gated routes.

use booking_core::{BookingError, BookingResult, UserRole};

/// Checks a principal's role against the role a route requires.
///
/// A principal without a role is unauthorized. `Admin` satisfies every
/// requirement; otherwise the roles must match.
pub fn authorize_role(principal: Option<UserRole>, required: UserRole) -> BookingResult<()> {
    let Some(role) = principal else {
        return Err(BookingError::unauthorized("Not authorized"));
    };

    if role.satisfies(required) {
        Ok(())
    } else {
        Err(BookingError::forbidden(format!(
            "Required role: {}, your role: {}",
            required, role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_passes_every_gate() {
        assert!(authorize_role(Some(UserRole::Admin), UserRole::Admin).is_ok());
        assert!(authorize_role(Some(UserRole::Admin), UserRole::User).is_ok());
    }

    #[test]
    fn test_user_is_forbidden_from_admin_gate() {
        assert!(authorize_role(Some(UserRole::User), UserRole::User).is_ok());
        assert!(matches!(
            authorize_role(Some(UserRole::User), UserRole::Admin),
            Err(BookingError::Forbidden(_))
        ));
    }

    #[test]
    fn test_missing_role_is_unauthorized() {
        assert!(matches!(
            authorize_role(None, UserRole::User),
            Err(BookingError::Unauthorized(_))
        ));
    }
}
