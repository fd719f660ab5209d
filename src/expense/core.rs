//! Defines the core data model and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    Error,
    database_id::ExpenseId,
    money::{deserialize_amount, serialize_amount},
    user::UserId,
};

// ============================================================================
// MODELS
// ============================================================================

/// A single recorded spend event owned by a user.
///
/// On the wire the owning user's ID is carried under the key `user` and the
/// amount is a string with two decimal places, e.g. `"15.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The ID of the user the expense belongs to.
    #[serde(rename = "user")]
    pub user_id: UserId,
    /// A short text description of what the expense was for.
    pub title: String,
    /// The amount of money spent.
    #[serde(
        serialize_with = "serialize_amount",
        deserialize_with = "deserialize_amount"
    )]
    pub amount: f64,
    /// When the expense happened.
    pub date: Date,
    /// A free-form label used to group expenses for summary reporting.
    pub category: String,
}

/// The data needed to create a new [Expense].
///
/// The ID is assigned by the database on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The ID of the user the expense belongs to.
    pub user_id: UserId,
    /// A short text description of what the expense was for.
    pub title: String,
    /// The amount of money spent. Must be greater than zero.
    pub amount: f64,
    /// When the expense happened.
    pub date: Date,
    /// A free-form label used to group expenses for summary reporting.
    pub category: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is not a finite number greater
///   than zero,
/// - or [Error::InvalidUser] if the user ID does not refer to a registered
///   user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    if !new_expense.amount.is_finite() || new_expense.amount <= 0.0 {
        return Err(Error::InvalidAmount);
    }

    let expense = connection
        .prepare(
            "INSERT INTO expense (user_id, title, amount, date, category)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, title, amount, date, category",
        )?
        .query_row(
            (
                new_expense.user_id.as_i64(),
                new_expense.title,
                new_expense.amount,
                new_expense.date,
                new_expense.category,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidUser(new_expense.user_id),
            error => error.into(),
        })?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, user_id, title, amount, date, category FROM expense WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Delete the expense with `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Get all expenses in the database, ordered by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, user_id, title, amount, date, category FROM expense ORDER BY id ASC")?
        .query_map([], map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Get the expenses belonging to `user_id` with dates in the inclusive range
/// `[start, end]`, ordered by ID.
///
/// A reversed range matches no rows.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_expenses_in_range(
    user_id: UserId,
    start: Date,
    end: Date,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, title, amount, date, category FROM expense
             WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
             ORDER BY id ASC",
        )?
        .query_map((user_id.as_i64(), start, end), map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Get the expenses belonging to `user_id` dated in the calendar month
/// `month` of any year, ordered by ID.
///
/// The year is deliberately ignored: November 2023 and November 2024 both
/// match month 11.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_expenses_in_month(
    user_id: UserId,
    month: Month,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, title, amount, date, category FROM expense
             WHERE user_id = ?1 AND CAST(strftime('%m', date) AS INTEGER) = ?2
             ORDER BY id ASC",
        )?
        .query_map((user_id.as_i64(), u8::from(month)), map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id)
                )",
        (),
    )?;

    // Index used by the date-range and month queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_user_date ON expense(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = UserId::new(row.get(1)?);
    let title = row.get(2)?;
    let amount = row.get(3)?;
    let date = row.get(4)?;
    let category = row.get(5)?;

    Ok(Expense {
        id,
        user_id,
        title,
        amount,
        date,
        category,
    })
}

// ============================================================================
// TESTS
// ============================================================================
