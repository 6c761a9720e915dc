//! Error rendering for Axum.
//!
//! Every failure leaves the API as
//! `{"errors":[{"detail","source","status","title"}]}`. The `source` is the
//! request path, captured per request by [`capture_source`] and read back
//! here, so error values never carry it themselves.
//!
//! [`capture_source`]: crate::middleware::capture_source

use booking_core::{BookingError, ErrorResponse};
use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use tower::timeout::error::Elapsed;
use tracing::{error, warn};

tokio::task_local! {
    /// Path and query of the request being served.
    pub static REQUEST_SOURCE: String;
}

/// Returns the path of the request being served, or an empty string outside
/// a request scope.
#[must_use]
pub fn current_source() -> String {
    REQUEST_SOURCE
        .try_with(Clone::clone)
        .unwrap_or_default()
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let source = current_source();

        if status.is_server_error() {
            error!("{} {}: {}", status.as_u16(), source, self.0);
        } else {
            warn!("{} {}: {}", status.as_u16(), source, self.0);
        }

        let body = ErrorResponse::from_error(&self.0, source);
        (status, Json(body)).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
#[allow(clippy::unnecessary_wraps)]
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Fallback for unmatched routes.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError(BookingError::not_found("Route", uri.path()))
}

/// Renders a failure raised by the service stack below the router's error
/// handler. An elapsed request deadline becomes a 408.
pub async fn handle_layer_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError(BookingError::timeout("Request took too long to complete"))
    } else {
        AppError(BookingError::Internal(err.to_string()))
    }
}
