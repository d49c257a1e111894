//! Baseline seed data
//!
//! Fixed first-run event set used when no remote data has ever been fetched.
//! The store must never be left empty just because the remote event service
//! is unreachable on startup.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::models::{EventCategory, EventDraft, RecurrencePattern};

/// Baseline events anchored to the next occurrences after `today`
pub fn baseline_events(today: NaiveDate) -> Vec<EventDraft> {
    let sunday = next_weekday(today, Weekday::Sun);
    let wednesday = next_weekday(today, Weekday::Wed);

    let mut service = EventDraft::new(
        "Sunday Worship Service",
        EventCategory::SundayService,
        sunday,
        NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
    );
    service.location = Some("Main Sanctuary".to_string());
    service.is_recurring = true;
    service.recurrence = Some(RecurrencePattern::Weekly);

    let mut study = EventDraft::new(
        "Midweek Bible Study",
        EventCategory::BibleStudy,
        wednesday,
        NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
    );
    study.location = Some("Fellowship Hall".to_string());
    study.is_recurring = true;
    study.recurrence = Some(RecurrencePattern::Weekly);

    let mut retreat = EventDraft::new(
        "Leaders' Retreat",
        EventCategory::Conference,
        today + Duration::days(30),
        NaiveTime::from_hms_opt(8, 30, 0).expect("valid time"),
    );
    retreat.end_date = Some(today + Duration::days(32));
    retreat.registration_required = true;
    retreat.max_attendees = Some(40);
    retreat.registration_deadline = Some(today + Duration::days(21));
    retreat.budget = 15_000.0;

    vec![service, study, retreat]
}

fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let days_ahead = (7 + weekday.num_days_from_monday() as i64
        - from.weekday().num_days_from_monday() as i64)
        % 7;
    // Same weekday counts as next week so seeded events are always upcoming
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    from + Duration::days(days_ahead)
}
