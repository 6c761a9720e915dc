//! Main application router.

use crate::{
    controllers::{auth_controller, health_controller, user_controller, venue_controller},
    middleware::{capture_source, logging_middleware, require_role, RoleGate},
    responses::{handle_layer_error, not_found},
    state::AppState,
};
use booking_config::ServerConfig;
use booking_core::UserRole;
use booking_security::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderName, HeaderValue, Method},
    middleware, Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router.
///
/// ```text
/// /health /ready /live      public
/// /api/auth/*               public
/// /api/users/*              ADMIN
/// /api/venues   GET         USER
/// /api/venues   POST/PUT/DELETE  ADMIN
/// ```
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let admin_gate = middleware::from_fn_with_state(
        RoleGate::new(state.clone(), UserRole::Admin),
        require_role,
    );
    let user_gate = middleware::from_fn_with_state(
        RoleGate::new(state.clone(), UserRole::User),
        require_role,
    );

    let venues = venue_controller::read_router()
        .route_layer(user_gate)
        .merge(venue_controller::admin_router().route_layer(admin_gate.clone()));

    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/users", user_controller::router().route_layer(admin_gate))
        .nest("/venues", venues);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .fallback(not_found)
        .with_state(state);

    let router = with_request_timeout(router, server_config.request_timeout())
        .layer(create_cors_layer(server_config))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(capture_source));

    info!("Router created with REST endpoints under /api");
    router
}

/// Cuts off requests that run past `timeout`. The cut-off renders as a 408
/// in the usual error envelope.
fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_layer_error))
            .timeout(timeout),
    )
}

/// Creates a CORS layer based on server configuration.
///
/// `*` reflects the caller's origin so credentials stay allowed. The token
/// headers are exposed to browser clients.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    let origin = if server_config.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            server_config
                .cors_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .expose_headers([
            HeaderName::from_static(ACCESS_TOKEN_HEADER),
            HeaderName::from_static(REFRESH_TOKEN_HEADER),
        ])
}
