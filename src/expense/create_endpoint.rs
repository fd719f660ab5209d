//! Defines the endpoint for creating a new expense.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    expense::{NewExpense, create_expense},
    money::deserialize_amount,
    user::{UserId, user_exists},
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON payload for creating an expense.
#[derive(Debug, Deserialize)]
pub struct NewExpenseData {
    /// The ID of the user the expense belongs to.
    pub user: DatabaseId,
    /// A short text description of what the expense was for.
    pub title: String,
    /// The amount of money spent, as a number or a numeric string.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    /// The date the expense happened, as `YYYY-MM-DD`.
    pub date: Date,
    /// A free-form label used to group expenses for summary reporting.
    pub category: String,
}

/// Field-keyed validation error messages, e.g. `{"amount": ["..."]}`.
type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// A route handler for creating a new expense.
///
/// Responds with the created record and 201 Created on success, or a
/// field-keyed validation error object and 400 Bad Request if the amount is
/// not positive or the user does not exist.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Json(data): Json<NewExpenseData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let user_id = UserId::new(data.user);
    let mut errors = FieldErrors::new();

    // NaN compares false against 0.0, so check finiteness explicitly.
    if !data.amount.is_finite() || data.amount <= 0.0 {
        errors
            .entry("amount")
            .or_default()
            .push(amount_error_message());
    }

    match user_exists(user_id, &connection) {
        Ok(true) => {}
        Ok(false) => errors
            .entry("user")
            .or_default()
            .push(user_error_message(user_id)),
        Err(error) => return error.into_response(),
    }

    if !errors.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
    }

    let result = create_expense(
        NewExpense {
            user_id,
            title: data.title,
            amount: data.amount,
            date: data.date,
            category: data.category,
        },
        &connection,
    );

    match result {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(Error::InvalidAmount) => {
            field_error_response("amount", amount_error_message())
        }
        // The user could have been deleted between the existence check and
        // the insert.
        Err(Error::InvalidUser(user_id)) => {
            field_error_response("user", user_error_message(user_id))
        }
        Err(error) => {
            tracing::error!("could not create expense: {error}");
            error.into_response()
        }
    }
}

fn amount_error_message() -> String {
    "Amount must be greater than zero.".to_owned()
}

fn user_error_message(user_id: UserId) -> String {
    format!("User with ID {user_id} does not exist.")
}

fn field_error_response(field: &'static str, message: String) -> Response {
    let errors = FieldErrors::from([(field, vec![message])]);

    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}
