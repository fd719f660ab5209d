//! Grouping and summing of expense amounts by category.

use std::collections::HashMap;

use serde::Serialize;

use crate::{expense::Expense, money::serialize_amount};

/// The total amount spent on a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The sum of the amounts of the expenses in this category.
    #[serde(serialize_with = "serialize_amount")]
    pub total: f64,
}

/// Group `expenses` by category and sum the amounts per category.
///
/// Returns one entry per distinct category present, sorted by category name
/// so the output is deterministic.
pub fn summarize_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(&expense.category).or_insert(0.0) += expense.amount;
    }

    let mut summary: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
        })
        .collect();
    summary.sort_by(|a, b| a.category.cmp(&b.category));

    summary
}

#[cfg(test)]
mod aggregation_tests {
    use time::{Date, macros::date};

    use crate::{expense::Expense, user::UserId};

    use super::{CategoryTotal, summarize_by_category};

    fn expense(amount: f64, date: Date, category: &str) -> Expense {
        Expense {
            id: 1,
            user_id: UserId::new(1),
            title: "Test expense".to_owned(),
            amount,
            date,
            category: category.to_owned(),
        }
    }

    #[test]
    fn sums_amounts_per_category() {
        let expenses = [
            expense(15.5, date!(2024 - 11 - 10), "Food"),
            expense(30.0, date!(2024 - 11 - 11), "Travel"),
            expense(4.5, date!(2024 - 11 - 12), "Food"),
        ];

        let summary = summarize_by_category(&expenses);

        assert_eq!(
            summary,
            vec![
                CategoryTotal {
                    category: "Food".to_owned(),
                    total: 20.0,
                },
                CategoryTotal {
                    category: "Travel".to_owned(),
                    total: 30.0,
                },
            ]
        );
    }

    #[test]
    fn returns_one_entry_per_distinct_category() {
        let expenses = [
            expense(1.0, date!(2024 - 11 - 10), "Food"),
            expense(2.0, date!(2024 - 11 - 11), "Food"),
            expense(3.0, date!(2024 - 11 - 12), "Food"),
        ];

        let summary = summarize_by_category(&expenses);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total, 6.0);
    }

    #[test]
    fn empty_input_produces_empty_summary() {
        assert!(summarize_by_category(&[]).is_empty());
    }

    #[test]
    fn serializes_total_as_two_decimal_string() {
        let summary = summarize_by_category(&[expense(15.5, date!(2024 - 11 - 10), "Food")]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json[0]["total"], "15.50");
        assert_eq!(json[0]["category"], "Food");
    }
}
