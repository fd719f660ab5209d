//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}/', use
//! [format_endpoint].

/// The route to list all expenses and create a new expense.
pub const EXPENSES: &str = "/expenses/";
/// The route to retrieve or delete a single expense.
pub const EXPENSE: &str = "/expenses/{expense_id}/";
/// The route to query a user's expenses within a date range.
pub const DATE_RANGE: &str = "/expenses/date-range/{user_id}/";
/// The route to summarize a user's expenses by category for a month.
pub const SUMMARY: &str = "/expenses/summary/{user_id}/{month}/";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}/',
/// '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters. Only the first parameter is replaced, so calls can be chained
/// for paths with more than one parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
