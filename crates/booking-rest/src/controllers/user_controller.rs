//! User administration controller. Every route requires `ADMIN`.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use booking_core::BookingError;
use booking_service::{ChangePasswordRequest, CreateUser, UserView};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Router,
};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(add_user))
        .route("/:id", get(get_user))
        .route("/:id/password", put(change_password))
}

/// List all users.
async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserView>> {
    debug!("List users request");

    let users = state.user_service.get_all_users().await?;
    ok(users.into_iter().map(UserView::from).collect())
}

/// Create a user with an explicit role.
async fn add_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUser>,
) -> ApiResult<UserView> {
    debug!("Add user request: {}", request.username);

    let user = state.user_service.add_user(Some(request)).await?;
    ok(user.into())
}

/// Get a user by ID.
async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserView> {
    debug!("Get user request: {}", id);

    let user = state
        .user_service
        .get_user_by_id(&id, false)
        .await?
        .ok_or_else(|| BookingError::not_found("User", &id))?;
    ok(user.into())
}

/// Change a user's password.
async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<UserView> {
    debug!("Change password request: {}", id);

    let old_password = request.old_password.unwrap_or_default();
    let new_password = request.new_password.unwrap_or_default();
    let user = state
        .user_service
        .change_password(&id, &old_password, &new_password)
        .await?;
    ok(user.into())
}
