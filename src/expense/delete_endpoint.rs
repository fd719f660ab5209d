//! Defines the endpoint for deleting an expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::ExpenseId, expense::delete_expense};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense.
///
/// Responds with 204 No Content on success, or a JSON 404 if no expense with
/// `expense_id` exists.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(Error::NotFound) => Error::NotFound.into_response(),
        Err(error) => {
            tracing::error!("could not delete expense {expense_id}: {error}");
            error.into_response()
        }
    }
}
