//! Role gate middleware.

use crate::{responses::AppError, state::AppState};
use booking_core::{BookingError, User, UserRole};
use booking_security::{authorize_role, ACCESS_TOKEN_HEADER};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

const LOGIN_AGAIN: &str = "Please log in again";

/// State for [`require_role`]: the services plus the role a route needs.
#[derive(Clone)]
pub struct RoleGate {
    state: AppState,
    role: UserRole,
}

impl RoleGate {
    /// Creates a gate for `role`.
    #[must_use]
    pub fn new(state: AppState, role: UserRole) -> Self {
        Self { state, role }
    }

    /// Resolves the caller behind an access token.
    async fn authenticate(&self, token: &str) -> Result<User, BookingError> {
        let payload = self.state.token_provider.verify_access_token(token).map_err(|e| {
            debug!("Access token rejected: {}", e);
            BookingError::unauthorized(LOGIN_AGAIN)
        })?;

        match self
            .state
            .user_service
            .get_user_by_id(payload.user_id(), true)
            .await
        {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                warn!("Token subject {} no longer exists", payload.user_id());
                Err(BookingError::unauthorized(LOGIN_AGAIN))
            }
            Err(e) => {
                debug!("Principal lookup failed: {}", e);
                Err(BookingError::unauthorized(LOGIN_AGAIN))
            }
        }
    }
}

/// Admits callers holding the gate's role or `ADMIN`.
///
/// The resolved [`User`] is stored in request extensions for
/// [`CurrentUser`](crate::extractors::CurrentUser).
pub async fn require_role(
    State(gate): State<RoleGate>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            warn!("No access token provided");
            BookingError::bad_request("Please log in")
        })?;

    let user = gate.authenticate(token).await?;
    authorize_role(user.role, gate.role)?;

    debug!("Admitted user {} for role {}", user.id, gate.role);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
