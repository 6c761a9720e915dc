//! Venue controller.
//!
//! Reads need `USER`, writes need `ADMIN`.

use crate::{
    extractors::{CurrentUser, ValidatedJson, VenueListQuery},
    responses::{ok, ApiResult},
    state::AppState,
};
use booking_service::{VenueAdminView, VenueInput, VenuePageView, VenueView};
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use tracing::debug;

/// Routes open to any signed-in user.
pub fn read_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_venues))
        .route("/:id", get(get_venue))
}

/// Routes reserved for administrators.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_venue))
        .route("/:id", put(modify_venue).delete(remove_venue))
}

/// List venues with paging and an optional location filter.
async fn list_venues(
    State(state): State<AppState>,
    VenueListQuery(query): VenueListQuery,
) -> ApiResult<VenuePageView> {
    debug!("List venues request: {:?}", query);

    let page = state.venue_service.get_many_venues(query).await?;
    ok(page.into())
}

/// Get a venue by ID.
async fn get_venue(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<VenueView> {
    debug!("Get venue request: {}", id);

    let venue = state.venue_service.get_venue_by_id(&id).await?;
    ok(venue.into())
}

/// Create a venue owned by the caller.
async fn add_venue(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<VenueInput>,
) -> ApiResult<VenueAdminView> {
    debug!("Add venue request: {}", input.name);

    let venue = state.venue_service.add_venue(input, &user).await?;
    ok(venue.into())
}

/// Replace a venue's details.
async fn modify_venue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<VenueInput>,
) -> ApiResult<VenueAdminView> {
    debug!("Modify venue request: {}", id);

    let venue = state.venue_service.modify_venue(&id, input).await?;
    ok(venue.into())
}

/// Delete a venue.
async fn remove_venue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<VenueAdminView> {
    debug!("Remove venue request: {}", id);

    let venue = state.venue_service.remove_venue(&id).await?;
    ok(venue.into())
}
