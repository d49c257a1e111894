//! Data models
//!
//! This module contains the core domain entities of the events module

pub mod event;
pub mod expense;
pub mod registration;
pub mod statistics;

pub use event::{Event, EventCategory, EventDraft, EventPatch, EventStatus, RecurrencePattern};
pub use expense::{Expense, ExpenseDraft, EXPENSE_CATEGORIES};
pub use registration::{RegistrantDetails, Registration, RegistrationStatus};
pub use statistics::{BudgetSummary, EventStatistics};
