//! Authentication controller.

use crate::{
    extractors::{JsonBody, ValidatedJson},
    responses::AppError,
    state::AppState,
};
use booking_security::REFRESH_TOKEN_HEADER;
use booking_service::{LoginRequest, PublicUserDto, RegisterRequest, UserView};
use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use tracing::debug;

/// Token headers plus a JSON body.
type WithTokens<T> = Result<(HeaderMap, Json<T>), AppError>;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refresh", post(refresh_token))
}

/// Login with email and password.
async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> WithTokens<UserView> {
    debug!("Login request for: {}", request.email);

    let mut headers = HeaderMap::new();
    let user = state.auth_service.login(&mut headers, request).await?;
    Ok((headers, Json(user.into())))
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> WithTokens<PublicUserDto> {
    debug!("Registration request for: {}", request.username);

    let mut headers = HeaderMap::new();
    let user = state.auth_service.register(&mut headers, request).await?;
    Ok((headers, Json(user.into())))
}

/// Exchange the `x-refresh-token` header for a new access token.
async fn refresh_token(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> WithTokens<UserView> {
    debug!("Token refresh request");

    let token = request_headers
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    let mut headers = HeaderMap::new();
    let user = state.auth_service.refresh_token(&mut headers, token).await?;
    Ok((headers, Json(user.into())))
}
