//! Expenseur is a small REST API for recording and querying personal
//! expenses.
//!
//! This library provides JSON endpoints for creating, listing, retrieving and
//! deleting expense records, plus two query endpoints: expenses within an
//! inclusive date range and per-category spending totals for a given month.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
pub mod endpoints;
mod expense;
mod logging;
mod money;
mod routing;
mod user;
pub mod validation;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use expense::{Expense, NewExpense, count_expenses, create_expense};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use user::{User, UserId, count_users, create_user, get_user_by_id, user_exists};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount of zero or less was used to create an expense.
    ///
    /// Expenses record money that was spent, so amounts must be strictly
    /// positive.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The user ID used to create an expense did not match a registered user.
    #[error("the user ID {0} does not refer to a registered user")]
    InvalidUser(UserId),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "The requested resource could not be found."})),
            )
                .into_response(),
            Error::InvalidAmount | Error::InvalidUser(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": self.to_string()})),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal Server Error"})),
                )
                    .into_response()
            }
        }
    }
}
