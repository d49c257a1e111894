//! Statistics and budget summary models

use serde::{Deserialize, Serialize};

/// Summary metrics over the current event set.
///
/// Sourced from the remote event service when a sync succeeds, otherwise
/// recomputed locally so the summary and the event list never disagree about
/// which world they describe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventStatistics {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub events_this_week: usize,
    pub events_this_month: usize,
    pub total_registrations: usize,
    /// Percentage figure. Remote-computed when available; the local fallback
    /// formula is a best-effort estimate over capacity-bounded events.
    pub average_attendance: f64,
    pub total_budget: f64,
    pub total_spent: f64,
}

/// Per-event budget health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub event_id: i64,
    pub allocated: f64,
    pub spent: f64,
    /// May be negative: overspend is surfaced, not rejected
    pub remaining: f64,
    /// `None` when no budget is allocated (never divides by zero)
    pub percent_used: Option<f64>,
}
