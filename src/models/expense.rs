//! Expense model
//!
//! An expense is a committed spend record against one event's budget.
//! Expenses are append-only: once committed they are neither edited nor
//! deleted, and each one increments the owning event's cumulative cost.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suggested expense categories. Free-form values are accepted, the list is
/// advisory and not enforced.
pub const EXPENSE_CATEGORIES: [&str; 10] = [
    "venue",
    "equipment",
    "catering",
    "transport",
    "materials",
    "decoration",
    "honorarium",
    "printing",
    "media",
    "miscellaneous",
];

/// A committed spend record against one event's budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub event_id: i64,
    pub description: String,
    /// Strictly positive
    pub amount: f64,
    pub category: String,
    pub incurred_on: NaiveDate,
    pub receipt_reference: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Request payload for recording an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub incurred_on: NaiveDate,
    pub receipt_reference: Option<String>,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        incurred_on: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            incurred_on,
            receipt_reference: None,
        }
    }
}
