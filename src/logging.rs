//! Middleware for logging requests and responses.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// Log each request's method and path, and the response status and handling
/// latency.
///
/// Both lines are logged at the `info` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    tracing::info!("Request: {method} {path}");

    let start_time = Instant::now();
    let response = next.run(request).await;
    let execution_time = start_time.elapsed();

    tracing::info!(
        "Response Status: {} | Time: {:.4}s",
        response.status().as_u16(),
        execution_time.as_secs_f64()
    );

    response
}
