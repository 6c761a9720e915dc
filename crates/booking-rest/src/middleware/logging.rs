//! Request logging and error-source capture.

use crate::responses::REQUEST_SOURCE;
use axum::{
    body::Body,
    extract::OriginalUri,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

/// Request logging middleware.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        target: "http",
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "HTTP request completed"
    );

    response
}

/// Runs the rest of the stack with the request path in scope for error
/// rendering.
pub async fn capture_source(request: Request<Body>, next: Next) -> Response {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().clone(), |original| original.0.clone());
    let source = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);

    REQUEST_SOURCE.scope(source, next.run(request)).await
}
