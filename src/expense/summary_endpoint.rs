//! Defines the endpoint for summarizing a user's spend by category for a
//! given month.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    expense::{get_expenses_in_month, summarize_by_category},
    user::UserId,
    validation::parse_month,
};

/// The state needed to summarize expenses by category.
#[derive(Debug, Clone)]
pub struct CategorySummaryState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategorySummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with per-category totals for a user's
/// expenses dated in the given month.
///
/// The month segment must be an integer in [1, 12]. The year is ignored:
/// expenses from November of any year count toward month 11. Responds with a
/// JSON 404 if the user has no expenses in that month.
pub async fn category_summary_endpoint(
    State(state): State<CategorySummaryState>,
    Path((user_id, month)): Path<(DatabaseId, String)>,
) -> Response {
    let month = match parse_month(&month) {
        Ok(month) => month,
        Err(error) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": error.to_string()})),
            )
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let expenses = match get_expenses_in_month(UserId::new(user_id), month, &connection) {
        Ok(expenses) => expenses,
        Err(error) => return error.into_response(),
    };

    if expenses.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "No expenses found for the specified month."})),
        )
            .into_response();
    }

    Json(summarize_by_category(&expenses)).into_response()
}
