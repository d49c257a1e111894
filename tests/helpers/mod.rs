//! Shared helpers for integration tests

#![allow(dead_code)]

use chrono::{Duration, Local, NaiveDate, NaiveTime, Utc};
use wiremock::MockServer;

use Shepherd::config::Settings;
use Shepherd::models::{Event, EventCategory, EventDraft, EventStatistics, EventStatus};
use Shepherd::ServiceFactory;

/// Build a service factory wired against a wiremock event service
pub async fn factory_for(server: &MockServer) -> ServiceFactory {
    let mut settings = Settings::default();
    settings.service.base_url = server.uri();
    settings.service.timeout_seconds = 2;
    ServiceFactory::new(settings).expect("factory construction")
}

/// A remote-authored event record as the event service would return it
pub fn remote_event(id: i64, title: &str, category: EventCategory) -> Event {
    let start_date = Local::now().date_naive() + Duration::days(14);
    Event {
        id,
        code: format!("EVT-{}-{:04}", start_date.format("%Y%m%d"), id),
        title: title.to_string(),
        description: None,
        category,
        location: Some("Main Sanctuary".to_string()),
        organizer: None,
        contact_email: None,
        contact_phone: None,
        start_date,
        end_date: None,
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: None,
        is_recurring: false,
        recurrence: None,
        registration_required: false,
        max_attendees: None,
        registration_deadline: None,
        budget: 0.0,
        actual_cost: 0.0,
        status: EventStatus::Planned,
        is_active: true,
        registrations: vec![],
        expenses: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Remote-computed statistics distinguishable from any local recomputation
pub fn remote_statistics(total_events: usize) -> EventStatistics {
    EventStatistics {
        total_events,
        upcoming_events: total_events,
        average_attendance: 72.5,
        ..Default::default()
    }
}

/// A valid local draft starting `days_ahead` days from now
pub fn draft(title: &str, category: EventCategory, days_ahead: i64) -> EventDraft {
    EventDraft::new(
        title,
        category,
        Local::now().date_naive() + Duration::days(days_ahead),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    )
}

/// Yesterday as a calendar date
pub fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Duration::days(1)
}
