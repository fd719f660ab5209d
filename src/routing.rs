//! Application router configuration for the expense API routes.

use std::any::Any;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::{
    AppState, endpoints,
    expense::{
        category_summary_endpoint, create_expense_endpoint, date_range_endpoint,
        delete_expense_endpoint, get_expense_endpoint, get_expenses_endpoint,
    },
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
///
/// The router wraps every handler with the request logging middleware and a
/// panic recovery layer that converts escaped panics into a generic JSON 500,
/// and answers unmatched paths with a JSON 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(get_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(endpoints::DATE_RANGE, get(date_range_endpoint))
        .route(endpoints::SUMMARY, get(category_summary_endpoint))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// The fallback handler for paths that match no route.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "The requested resource could not be found."})),
    )
        .into_response()
}

/// Convert a panic that escaped a handler into a generic JSON 500.
///
/// The panic detail is logged on the server and not leaked to the client.
fn handle_panic(error: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = error.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = error.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    tracing::error!("a request handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal Server Error"})),
    )
        .into_response()
}
