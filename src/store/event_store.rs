//! Event store
//!
//! The single authoritative in-memory collection of events. All mutation of
//! event records happens here, under one write lock; every other component
//! works on cloned snapshots and treats them as immutable.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    Event, EventDraft, EventPatch, EventStatistics, EventStatus, Expense, ExpenseDraft,
    RegistrantDetails, Registration, RegistrationStatus,
};
use crate::query::stats::compute_statistics;
use crate::utils::errors::{Result, ShepherdError};

struct StoreInner {
    /// Insertion-ordered live set; relative order is what filtered views see
    events: Vec<Event>,
    next_id: i64,
    next_code_seq: u32,
    /// Cached summary: remote-computed after a successful sync, locally
    /// recomputed otherwise. Replaced wholesale, never patched.
    statistics: Option<EventStatistics>,
}

/// Authoritative in-memory event collection
#[derive(Clone)]
pub struct EventStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                events: Vec::new(),
                next_id: 1,
                next_code_seq: 1,
                statistics: None,
            })),
        }
    }

    /// Create a new event from a draft.
    ///
    /// Assigns id, external code and timestamps; new events always start as
    /// Planned and active. Validation failures abort with no mutation.
    pub async fn create(&self, draft: EventDraft) -> Result<Event> {
        validate_draft(&draft)?;

        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let seq = inner.next_code_seq;
        inner.next_code_seq += 1;

        let now = Utc::now();
        let event = Event {
            id,
            code: format!("EVT-{}-{:04}", draft.start_date.format("%Y%m%d"), seq),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            organizer: draft.organizer,
            contact_email: draft.contact_email,
            contact_phone: draft.contact_phone,
            start_date: draft.start_date,
            end_date: draft.end_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            is_recurring: draft.is_recurring,
            recurrence: draft.recurrence,
            registration_required: draft.registration_required,
            max_attendees: draft.max_attendees,
            registration_deadline: draft.registration_deadline,
            budget: draft.budget,
            actual_cost: 0.0,
            status: EventStatus::Planned,
            is_active: true,
            registrations: vec![],
            expenses: vec![],
            created_at: now,
            updated_at: now,
        };

        info!(event_id = event.id, code = %event.code, "Event created");
        inner.events.push(event.clone());
        Ok(event)
    }

    /// Merge a partial update into an existing event.
    ///
    /// Moving a completed or cancelled event back to Planned requires the
    /// staff reopen override.
    pub async fn update(&self, id: i64, patch: EventPatch, allow_reopen: bool) -> Result<Event> {
        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ShepherdError::EventNotFound { event_id: id })?;

        if let Some(next_status) = patch.status {
            if !event.status.can_transition_to(next_status) && !allow_reopen {
                return Err(ShepherdError::InvalidStateTransition {
                    from: event.status.to_string(),
                    to: next_status.to_string(),
                });
            }
        }

        apply_patch(event, patch);
        event.updated_at = Utc::now();

        debug!(event_id = id, "Event updated");
        Ok(event.clone())
    }

    /// Hard-delete an event, cascading to its registrations and expenses
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let position = inner
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(ShepherdError::EventNotFound { event_id: id })?;

        // Children live inside the event record, removal cascades by construction
        inner.events.remove(position);
        info!(event_id = id, "Event deleted");
        Ok(())
    }

    /// Snapshot of a single event
    pub async fn get(&self, id: i64) -> Result<Event> {
        let inner = self.inner.read().await;
        inner
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(ShepherdError::EventNotFound { event_id: id })
    }

    /// Snapshot of the full live set in insertion order
    pub async fn list(&self) -> Vec<Event> {
        self.inner.read().await.events.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.events.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.events.is_empty()
    }

    /// Atomically replace the whole collection and the cached statistics with
    /// a remote-authored result. Id and code counters are re-seeded above the
    /// incoming maxima so later local creations stay unique.
    pub async fn replace_all(&self, events: Vec<Event>, statistics: EventStatistics) {
        let mut inner = self.inner.write().await;

        let max_id = events.iter().map(|e| e.id).max().unwrap_or(0);
        inner.next_id = inner.next_id.max(max_id + 1);
        let max_seq = events.iter().filter_map(|e| code_sequence(&e.code)).max();
        if let Some(seq) = max_seq {
            inner.next_code_seq = inner.next_code_seq.max(seq + 1);
        }

        debug!(event_count = events.len(), "Event set replaced from remote");
        inner.events = events;
        inner.statistics = Some(statistics);
    }

    /// Merge one remote-authored record into the live set (dual-path writes)
    pub async fn upsert(&self, event: Event) {
        let mut inner = self.inner.write().await;
        inner.next_id = inner.next_id.max(event.id + 1);
        if let Some(seq) = code_sequence(&event.code) {
            inner.next_code_seq = inner.next_code_seq.max(seq + 1);
        }

        match inner.events.iter().position(|e| e.id == event.id) {
            Some(position) => inner.events[position] = event,
            None => inner.events.push(event),
        }
    }

    /// Append a registration, enforcing the registration preconditions
    /// atomically under the write lock.
    pub async fn add_registration(
        &self,
        event_id: i64,
        details: RegistrantDetails,
        status: RegistrationStatus,
        today: chrono::NaiveDate,
    ) -> Result<Registration> {
        if details.name.trim().is_empty() {
            return Err(ShepherdError::Validation("Registrant name is required".to_string()));
        }
        if details.email.trim().is_empty() {
            return Err(ShepherdError::Validation("Registrant email is required".to_string()));
        }

        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or(ShepherdError::EventNotFound { event_id })?;

        if !event.registration_required {
            return Err(ShepherdError::PreconditionFailed(
                "Event does not take registrations".to_string(),
            ));
        }
        if let Some(deadline) = event.registration_deadline {
            if deadline < today {
                return Err(ShepherdError::PreconditionFailed(
                    "Registration deadline has passed".to_string(),
                ));
            }
        }
        let email = details.email.trim().to_lowercase();
        if event
            .registrations
            .iter()
            .any(|r| r.status != RegistrationStatus::Cancelled && r.email.to_lowercase() == email)
        {
            return Err(ShepherdError::PreconditionFailed(
                "Registrant is already signed up for this event".to_string(),
            ));
        }
        if let Some(limit) = event.capacity_limit() {
            if event.confirmed_registrations() >= limit as usize {
                return Err(ShepherdError::CapacityExceeded { event_id });
            }
        }

        let registration = Registration {
            id: Uuid::new_v4(),
            event_id,
            name: details.name,
            email: details.email,
            phone: details.phone,
            special_requirements: details.special_requirements,
            status,
            registered_at: Utc::now(),
        };

        event.registrations.push(registration.clone());
        event.updated_at = Utc::now();
        info!(event_id = event_id, registration_id = %registration.id, "Registration recorded");
        Ok(registration)
    }

    /// Append an expense and increment the event's cumulative cost by exactly
    /// the expense amount, in one atomic step.
    pub async fn add_expense(&self, event_id: i64, draft: ExpenseDraft) -> Result<Expense> {
        if !(draft.amount > 0.0) {
            return Err(ShepherdError::Validation(
                "Expense amount must be greater than zero".to_string(),
            ));
        }
        if draft.description.trim().is_empty() {
            return Err(ShepherdError::Validation("Expense description is required".to_string()));
        }

        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or(ShepherdError::EventNotFound { event_id })?;

        let expense = Expense {
            id: Uuid::new_v4(),
            event_id,
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            incurred_on: draft.incurred_on,
            receipt_reference: draft.receipt_reference,
            recorded_at: Utc::now(),
        };

        event.actual_cost += expense.amount;
        event.expenses.push(expense.clone());
        event.updated_at = Utc::now();
        info!(
            event_id = event_id,
            amount = expense.amount,
            actual_cost = event.actual_cost,
            "Expense recorded"
        );
        Ok(expense)
    }

    /// Current statistics: the cached (remote or local) summary, or a fresh
    /// local computation when nothing is cached yet.
    pub async fn statistics(&self, now: NaiveDateTime) -> EventStatistics {
        let inner = self.inner.read().await;
        match &inner.statistics {
            Some(cached) => cached.clone(),
            None => compute_statistics(&inner.events, now),
        }
    }

    /// Recompute the cached statistics from the current local set
    pub async fn recompute_statistics(&self, now: NaiveDateTime) -> EventStatistics {
        let mut inner = self.inner.write().await;
        let stats = compute_statistics(&inner.events, now);
        inner.statistics = Some(stats.clone());
        stats
    }
}

pub(crate) fn validate_draft(draft: &EventDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(ShepherdError::Validation("Event title is required".to_string()));
    }
    if draft.budget < 0.0 {
        return Err(ShepherdError::Validation("Budget cannot be negative".to_string()));
    }
    if let Some(end_date) = draft.end_date {
        if end_date < draft.start_date {
            return Err(ShepherdError::Validation(
                "End date cannot be before start date".to_string(),
            ));
        }
    }
    Ok(())
}

fn apply_patch(event: &mut Event, patch: EventPatch) {
    if let Some(title) = patch.title {
        event.title = title;
    }
    if let Some(description) = patch.description {
        event.description = Some(description);
    }
    if let Some(category) = patch.category {
        event.category = category;
    }
    if let Some(location) = patch.location {
        event.location = Some(location);
    }
    if let Some(organizer) = patch.organizer {
        event.organizer = Some(organizer);
    }
    if let Some(contact_email) = patch.contact_email {
        event.contact_email = Some(contact_email);
    }
    if let Some(contact_phone) = patch.contact_phone {
        event.contact_phone = Some(contact_phone);
    }
    if let Some(start_date) = patch.start_date {
        event.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        event.end_date = Some(end_date);
    }
    if let Some(start_time) = patch.start_time {
        event.start_time = start_time;
    }
    if let Some(end_time) = patch.end_time {
        event.end_time = Some(end_time);
    }
    if let Some(is_recurring) = patch.is_recurring {
        event.is_recurring = is_recurring;
    }
    if let Some(recurrence) = patch.recurrence {
        event.recurrence = Some(recurrence);
    }
    if let Some(registration_required) = patch.registration_required {
        event.registration_required = registration_required;
    }
    if let Some(max_attendees) = patch.max_attendees {
        event.max_attendees = Some(max_attendees);
    }
    if let Some(registration_deadline) = patch.registration_deadline {
        event.registration_deadline = Some(registration_deadline);
    }
    if let Some(budget) = patch.budget {
        event.budget = budget;
    }
    if let Some(actual_cost) = patch.actual_cost {
        event.actual_cost = actual_cost;
    }
    if let Some(status) = patch.status {
        event.status = status;
    }
    if let Some(is_active) = patch.is_active {
        event.is_active = is_active;
    }
}

/// Extract the numeric suffix from an external event code
fn code_sequence(code: &str) -> Option<u32> {
    code.rsplit('-').next()?.parse().ok()
}
