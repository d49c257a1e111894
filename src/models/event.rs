//! Event model
//!
//! The central entity of the events module. Each `Event` row is a single
//! scheduled occurrence; recurrence is metadata only and is never expanded
//! into future rows here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;
use crate::models::registration::{Registration, RegistrationStatus};

/// Fixed set of event categories (part of the external contract)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    SundayService,
    MidweekService,
    PrayerMeeting,
    BibleStudy,
    YouthFellowship,
    WomensFellowship,
    MensFellowship,
    ChoirPractice,
    Conference,
    Seminar,
    Workshop,
    Wedding,
    Funeral,
    Baptism,
    Dedication,
    Fundraiser,
    Outreach,
    Other,
}

impl EventCategory {
    /// All categories, in their canonical display order
    pub const ALL: [EventCategory; 18] = [
        EventCategory::SundayService,
        EventCategory::MidweekService,
        EventCategory::PrayerMeeting,
        EventCategory::BibleStudy,
        EventCategory::YouthFellowship,
        EventCategory::WomensFellowship,
        EventCategory::MensFellowship,
        EventCategory::ChoirPractice,
        EventCategory::Conference,
        EventCategory::Seminar,
        EventCategory::Workshop,
        EventCategory::Wedding,
        EventCategory::Funeral,
        EventCategory::Baptism,
        EventCategory::Dedication,
        EventCategory::Fundraiser,
        EventCategory::Outreach,
        EventCategory::Other,
    ];

    /// Human-readable category label
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::SundayService => "Sunday Service",
            EventCategory::MidweekService => "Midweek Service",
            EventCategory::PrayerMeeting => "Prayer Meeting",
            EventCategory::BibleStudy => "Bible Study",
            EventCategory::YouthFellowship => "Youth Fellowship",
            EventCategory::WomensFellowship => "Women's Fellowship",
            EventCategory::MensFellowship => "Men's Fellowship",
            EventCategory::ChoirPractice => "Choir Practice",
            EventCategory::Conference => "Conference",
            EventCategory::Seminar => "Seminar",
            EventCategory::Workshop => "Workshop",
            EventCategory::Wedding => "Wedding",
            EventCategory::Funeral => "Funeral",
            EventCategory::Baptism => "Baptism",
            EventCategory::Dedication => "Dedication",
            EventCategory::Fundraiser => "Fundraiser",
            EventCategory::Outreach => "Outreach",
            EventCategory::Other => "Other",
        }
    }
}

/// Event lifecycle status
///
/// Planned is the only initial state. Nothing auto-transitions on time
/// passing; "upcoming" is always a derived predicate, never a stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// All statuses (part of the external contract)
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Planned,
        EventStatus::InProgress,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    /// Whether an explicit status update may move `self` into `next` without
    /// the staff reopen override. Only re-planning a finished or cancelled
    /// event is guarded.
    pub fn can_transition_to(&self, next: EventStatus) -> bool {
        match (self, next) {
            (EventStatus::Completed, EventStatus::Planned) => false,
            (EventStatus::Cancelled, EventStatus::Planned) => false,
            _ => true,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventStatus::Planned => "planned",
            EventStatus::InProgress => "in_progress",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

/// Recurrence cadence metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

/// A single scheduled occurrence.
///
/// Temporal fields are wall-clock calendar values with no implied timezone;
/// comparison and formatting must treat them as local calendar values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    /// Human-readable external code, unique and immutable after creation
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub is_recurring: bool,
    pub recurrence: Option<RecurrencePattern>,
    pub registration_required: bool,
    /// `None` or `Some(0)` both mean "no limit"
    pub max_attendees: Option<u32>,
    pub registration_deadline: Option<NaiveDate>,
    /// Allocated amount, >= 0
    pub budget: f64,
    /// Cumulative spend, >= 0. Not constrained to the budget: overspend is
    /// representable and surfaced, never rejected.
    pub actual_cost: f64,
    pub status: EventStatus,
    pub is_active: bool,
    pub registrations: Vec<Registration>,
    pub expenses: Vec<Expense>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Resolve start date + start time to a single sortable point
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    /// Derived predicate: the event has not started yet as of `now`
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.start_instant() >= now
    }

    /// Effective capacity limit; maps the "0 means unbounded" convention
    pub fn capacity_limit(&self) -> Option<u32> {
        match self.max_attendees {
            None | Some(0) => None,
            Some(limit) => Some(limit),
        }
    }

    /// Count of registrations currently occupying capacity
    pub fn confirmed_registrations(&self) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.status != RegistrationStatus::Cancelled)
            .count()
    }
}

/// Request payload for creating an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub is_recurring: bool,
    pub recurrence: Option<RecurrencePattern>,
    pub registration_required: bool,
    pub max_attendees: Option<u32>,
    pub registration_deadline: Option<NaiveDate>,
    pub budget: f64,
}

impl EventDraft {
    /// Minimal draft with the required fields; everything else defaulted
    pub fn new(title: impl Into<String>, category: EventCategory, start_date: NaiveDate, start_time: NaiveTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
            location: None,
            organizer: None,
            contact_email: None,
            contact_phone: None,
            start_date,
            end_date: None,
            start_time,
            end_time: None,
            is_recurring: false,
            recurrence: None,
            registration_required: false,
            max_attendees: None,
            registration_deadline: None,
            budget: 0.0,
        }
    }
}

/// Partial update payload; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_recurring: Option<bool>,
    pub recurrence: Option<RecurrencePattern>,
    pub registration_required: Option<bool>,
    pub max_attendees: Option<u32>,
    pub registration_deadline: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub actual_cost: Option<f64>,
    pub status: Option<EventStatus>,
    pub is_active: Option<bool>,
}
