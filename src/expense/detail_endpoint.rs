//! Defines the endpoint for retrieving a single expense by its ID.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::ExpenseId, expense::get_expense};

/// The state needed to retrieve an expense.
#[derive(Debug, Clone)]
pub struct ExpenseDetailState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseDetailState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the expense with `expense_id`, or a
/// JSON 404 if no such expense exists.
pub async fn get_expense_endpoint(
    State(state): State<ExpenseDetailState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_expense(expense_id, &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
        expense::{NewExpense, create_expense},
        user::create_user,
    };

    use super::get_expense_endpoint;

    fn get_test_server(state: AppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::EXPENSE, get(get_expense_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn returns_expense_by_id() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let expense_id = {
            let connection = state.db_connection.lock().unwrap();
            let user = create_user("testuser", "test@example.com", &connection).unwrap();
            create_expense(
                NewExpense {
                    user_id: user.id,
                    title: "Lunch".to_owned(),
                    amount: 15.5,
                    date: date!(2024 - 11 - 10),
                    category: "Food".to_owned(),
                },
                &connection,
            )
            .unwrap()
            .id
        };
        let server = get_test_server(state);

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE, expense_id))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["title"], "Lunch");
        assert_eq!(body["amount"], "15.50");
        assert_eq!(body["date"], "2024-11-10");
        assert_eq!(body["category"], "Food");
    }

    #[tokio::test]
    async fn responds_not_found_for_unknown_id() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server = get_test_server(state);

        let response = server.get(&format_endpoint(endpoints::EXPENSE, 42)).await;

        response.assert_status_not_found();
    }
}
