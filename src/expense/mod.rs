//! Expense management for the expense tracking API.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and `NewExpense` for creating expenses
//! - Database functions for storing, querying, and deleting expenses
//! - Route handlers for the expense endpoints

mod aggregation;
mod core;
mod create_endpoint;
mod date_range_endpoint;
mod delete_endpoint;
mod detail_endpoint;
mod list_endpoint;
mod summary_endpoint;

pub use aggregation::{CategoryTotal, summarize_by_category};
pub use core::{
    Expense, NewExpense, count_expenses, create_expense, create_expense_table, map_expense_row,
};
pub use create_endpoint::create_expense_endpoint;
pub use date_range_endpoint::date_range_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use detail_endpoint::get_expense_endpoint;
pub use list_endpoint::get_expenses_endpoint;
pub use summary_endpoint::category_summary_endpoint;

pub(crate) use core::{
    delete_expense, get_expense, get_expenses_in_month, get_expenses_in_range, list_expenses,
};
