//! Defines the endpoint for querying a user's expenses within a date range.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    expense::get_expenses_in_range,
    user::UserId,
    validation::parse_iso_date,
};

/// The state needed to query expenses by date range.
#[derive(Debug, Clone)]
pub struct DateRangeState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DateRangeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the date-range endpoint.
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    /// The inclusive start of the range, as `YYYY-MM-DD`.
    pub start: Option<String>,
    /// The inclusive end of the range, as `YYYY-MM-DD`.
    pub end: Option<String>,
}

/// A route handler that responds with a user's expenses dated within the
/// inclusive range `[start, end]`.
///
/// Both query parameters are required and must be valid `YYYY-MM-DD` dates.
/// The handler does not reject a start date later than the end date; such a
/// range simply matches no expenses ([crate::validation::validate_date_range]
/// offers the stricter check for callers that want it).
pub async fn date_range_endpoint(
    State(state): State<DateRangeState>,
    Path(user_id): Path<DatabaseId>,
    Query(params): Query<DateRangeParams>,
) -> Response {
    let (Some(start_text), Some(end_text)) = (
        params.start.as_deref().filter(|text| !text.is_empty()),
        params.end.as_deref().filter(|text| !text.is_empty()),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Both start and end dates are required."})),
        )
            .into_response();
    };

    let (Ok(start), Ok(end)) = (parse_iso_date(start_text), parse_iso_date(end_text)) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid date format. Use YYYY-MM-DD."})),
        )
            .into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_expenses_in_range(UserId::new(user_id), start, end, &connection) {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
        expense::{NewExpense, create_expense},
        user::{UserId, create_user},
    };

    use super::date_range_endpoint;

    fn get_test_server(state: AppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::DATE_RANGE, get(date_range_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    fn seed_expense(state: &AppState, user_id: UserId, amount: f64, date: Date, category: &str) {
        let connection = state.db_connection.lock().unwrap();
        create_expense(
            NewExpense {
                user_id,
                title: "Test expense".to_owned(),
                amount,
                date,
                category: category.to_owned(),
            },
            &connection,
        )
        .unwrap();
    }

    fn get_test_state() -> (AppState, UserId) {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let user_id = {
            let connection = state.db_connection.lock().unwrap();
            create_user("testuser", "test@example.com", &connection)
                .unwrap()
                .id
        };

        (state, user_id)
    }

    #[tokio::test]
    async fn returns_expenses_within_inclusive_range() {
        let (state, user_id) = get_test_state();
        seed_expense(&state, user_id, 15.5, date!(2024 - 11 - 10), "Food");
        seed_expense(&state, user_id, 30.0, date!(2024 - 11 - 11), "Travel");
        seed_expense(&state, user_id, 75.5, date!(2024 - 11 - 01), "Utilities");
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::DATE_RANGE, user_id.as_i64()))
            .add_query_param("start", "2024-11-01")
            .add_query_param("end", "2024-11-11")
            .await;

        response.assert_status_ok();
        let expenses: Vec<serde_json::Value> = response.json();
        assert_eq!(expenses.len(), 3);
    }

    #[tokio::test]
    async fn excludes_expenses_outside_range() {
        let (state, user_id) = get_test_state();
        seed_expense(&state, user_id, 15.5, date!(2024 - 11 - 10), "Food");
        seed_expense(&state, user_id, 99.0, date!(2024 - 12 - 25), "Gifts");
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::DATE_RANGE, user_id.as_i64()))
            .add_query_param("start", "2024-11-01")
            .add_query_param("end", "2024-11-30")
            .await;

        response.assert_status_ok();
        let expenses: Vec<serde_json::Value> = response.json();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0]["date"], "2024-11-10");
    }

    #[tokio::test]
    async fn rejects_missing_parameters() {
        let (state, user_id) = get_test_state();
        let server = get_test_server(state);
        let path = format_endpoint(endpoints::DATE_RANGE, user_id.as_i64());

        let missing_end = server
            .get(&path)
            .add_query_param("start", "2024-11-01")
            .await;
        missing_end.assert_status_bad_request();
        missing_end.assert_json(&serde_json::json!({
            "error": "Both start and end dates are required."
        }));

        let missing_both = server.get(&path).await;
        missing_both.assert_status_bad_request();
    }

    #[tokio::test]
    async fn rejects_malformed_dates() {
        let (state, user_id) = get_test_state();
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::DATE_RANGE, user_id.as_i64()))
            .add_query_param("start", "01/11/2024")
            .add_query_param("end", "2024-11-30")
            .await;

        response.assert_status_bad_request();
        response.assert_json(&serde_json::json!({
            "error": "Invalid date format. Use YYYY-MM-DD."
        }));
    }

    #[tokio::test]
    async fn reversed_range_returns_empty_array() {
        let (state, user_id) = get_test_state();
        seed_expense(&state, user_id, 15.5, date!(2024 - 11 - 10), "Food");
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::DATE_RANGE, user_id.as_i64()))
            .add_query_param("start", "2024-11-30")
            .add_query_param("end", "2024-11-01")
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }
}
