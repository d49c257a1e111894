//! Budget tracker
//!
//! Per-event running reconciliation of spend against allocation. Expenses are
//! append-only; each committed expense increments the owning event's
//! cumulative cost by exactly its amount, atomically with respect to
//! concurrent submissions for the same event.

use tracing::{debug, info};

use crate::models::{BudgetSummary, Event, Expense, ExpenseDraft};
use crate::services::auth::StaffContext;
use crate::services::events::EventCoordinator;
use crate::services::remote::RemoteEventService;
use crate::store::EventStore;
use crate::utils::errors::Result;
use crate::utils::logging::log_fallback;

/// Budget operations for a single event
#[derive(Clone)]
pub struct BudgetService {
    remote: RemoteEventService,
    store: EventStore,
    coordinator: EventCoordinator,
}

impl BudgetService {
    pub fn new(remote: RemoteEventService, store: EventStore, coordinator: EventCoordinator) -> Self {
        Self {
            remote,
            store,
            coordinator,
        }
    }

    /// Record an expense against an event's budget.
    ///
    /// The local commit is authoritative; the new cumulative cost is then
    /// pushed to the remote service best-effort, since the remote contract
    /// carries spend only as part of the event record.
    pub async fn record_expense(
        &self,
        ctx: &StaffContext,
        event_id: i64,
        draft: ExpenseDraft,
    ) -> Result<Expense> {
        let gate = self.coordinator.write_gate();
        let _gate = gate.lock().await;

        let expense = self.store.add_expense(event_id, draft).await?;
        info!(
            event_id = event_id,
            amount = expense.amount,
            staff_id = ctx.staff_id,
            "Expense committed"
        );

        if ctx.is_authorized() {
            let event = self.store.get(event_id).await?;
            let patch = crate::models::EventPatch {
                actual_cost: Some(event.actual_cost),
                ..Default::default()
            };
            match self.remote.update_event(ctx, event_id, &patch).await {
                Ok(_) => debug!(event_id = event_id, "Spend pushed to remote"),
                Err(e) => log_fallback("record_expense", &e.to_string()),
            }
        }

        Ok(expense)
    }

    /// Budget health for one event.
    ///
    /// `remaining` may be negative; `percent_used` is absent when no budget
    /// is allocated so the figure never divides by zero.
    pub fn budget_summary(&self, event: &Event) -> BudgetSummary {
        BudgetSummary {
            event_id: event.id,
            allocated: event.budget,
            spent: event.actual_cost,
            remaining: event.budget - event.actual_cost,
            percent_used: if event.budget > 0.0 {
                Some(event.actual_cost / event.budget * 100.0)
            } else {
                None
            },
        }
    }
}
