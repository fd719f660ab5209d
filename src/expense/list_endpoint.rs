//! Defines the endpoint for listing all expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, expense::list_expenses};

/// The state needed to list expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with all expense records as a JSON array.
pub async fn get_expenses_endpoint(State(state): State<ListExpensesState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match list_expenses(&connection) {
        Ok(expenses) => Json(expenses).into_response(),
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
        AppState, endpoints,
        expense::{NewExpense, create_expense},
        user::create_user,
    };

    use super::get_expenses_endpoint;

    fn get_test_server(state: AppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::EXPENSES, get(get_expenses_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn returns_empty_array_with_no_expenses() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let server = get_test_server(state);

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[tokio::test]
    async fn returns_all_persisted_expenses() {
        let state = AppState::new(Connection::open_in_memory().unwrap()).unwrap();
        let want_count = 3;
        {
            let connection = state.db_connection.lock().unwrap();
            let user = create_user("testuser", "test@example.com", &connection).unwrap();
            for i in 1..=want_count {
                create_expense(
                    NewExpense {
                        user_id: user.id,
                        title: format!("Expense {i}"),
                        amount: i as f64,
                        date: date!(2024 - 11 - 10),
                        category: "Food".to_owned(),
                    },
                    &connection,
                )
                .unwrap();
            }
        }
        let server = get_test_server(state);

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status_ok();
        let expenses: Vec<serde_json::Value> = response.json();
        assert_eq!(expenses.len(), want_count);
        assert_eq!(expenses[0]["title"], "Expense 1");
        assert_eq!(expenses[0]["amount"], "1.00");
        assert_eq!(expenses[0]["date"], "2024-11-10");
    }
}
