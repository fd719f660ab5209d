//! Functions for initializing the application's database.

use rusqlite::Connection;

use crate::{expense::create_expense_table, user::create_user_table};

/// Create the tables for the application's domain models.
///
/// Foreign key enforcement is switched on for `connection` so that expenses
/// cannot reference users that do not exist.
///
/// # Errors
/// Returns an error if the tables cannot be created or if there is an SQL
/// error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    create_user_table(connection)?;
    create_expense_table(connection)?;

    Ok(())
}
