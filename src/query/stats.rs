//! Statistics aggregator
//!
//! Pure summary computation over an event collection. Used whenever the
//! remote-computed statistics are unavailable so the summary always describes
//! the same event set the store is serving.

use chrono::{Datelike, NaiveDateTime};

use crate::models::{Event, EventStatistics};

/// Derive summary metrics from `events` as of `now`.
///
/// Single pass over the collection; registration counts come from the events'
/// owned children, there are no per-event lookups.
pub fn compute_statistics(events: &[Event], now: NaiveDateTime) -> EventStatistics {
    let today = now.date();
    let current_week = today.iso_week();

    let mut stats = EventStatistics::default();
    let mut attendance_samples = 0usize;
    let mut attendance_sum = 0.0f64;

    for event in events {
        stats.total_events += 1;

        if event.is_upcoming(now) {
            stats.upcoming_events += 1;
        }

        let event_week = event.start_date.iso_week();
        if event_week.year() == current_week.year() && event_week.week() == current_week.week() {
            stats.events_this_week += 1;
        }
        if event.start_date.year() == today.year() && event.start_date.month() == today.month() {
            stats.events_this_month += 1;
        }

        stats.total_registrations += event.registrations.len();
        stats.total_budget += event.budget;
        stats.total_spent += event.actual_cost;

        // Best-effort local attendance estimate: fill rate of the events that
        // actually bound their capacity.
        if event.registration_required {
            if let Some(limit) = event.capacity_limit() {
                attendance_samples += 1;
                attendance_sum += event.confirmed_registrations() as f64 / limit as f64 * 100.0;
            }
        }
    }

    if attendance_samples > 0 {
        stats.average_attendance = attendance_sum / attendance_samples as f64;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use uuid::Uuid;

    use crate::models::{EventCategory, EventStatus, RegistrantDetails, Registration, RegistrationStatus};

    fn event(id: i64, date: (i32, u32, u32)) -> Event {
        Event {
            id,
            code: format!("EVT-TEST-{:04}", id),
            title: format!("Event {}", id),
            description: None,
            category: EventCategory::Other,
            location: None,
            organizer: None,
            contact_email: None,
            contact_phone: None,
            start_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
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

    fn registration(event_id: i64, email: &str, status: RegistrationStatus) -> Registration {
        let details = RegistrantDetails::new("Member", email);
        Registration {
            id: Uuid::new_v4(),
            event_id,
            name: details.name,
            email: details.email,
            phone: None,
            special_requirements: None,
            status,
            registered_at: Utc::now(),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_collection_yields_zeroed_summary() {
        let stats = compute_statistics(&[], now());
        assert_eq!(stats, EventStatistics::default());
    }

    #[test]
    fn test_counts_by_time_window() {
        let events = vec![
            event(1, (2026, 8, 19)), // today: week + month + upcoming (10:00 < 12:00 is past, not upcoming)
            event(2, (2026, 8, 21)), // this week + month + upcoming
            event(3, (2026, 8, 30)), // this month + upcoming
            event(4, (2026, 9, 2)),  // upcoming only
            event(5, (2026, 8, 10)), // this month, already past
        ];

        let stats = compute_statistics(&events, now());
        assert_eq!(stats.total_events, 5);
        assert_eq!(stats.upcoming_events, 3);
        assert_eq!(stats.events_this_week, 2);
        assert_eq!(stats.events_this_month, 4);
    }

    #[test]
    fn test_budget_and_registration_totals() {
        let mut a = event(1, (2026, 8, 25));
        a.budget = 25_000.0;
        a.actual_cost = 12_000.0;
        a.registrations = vec![
            registration(1, "ruth@example.org", RegistrationStatus::Confirmed),
            registration(1, "noah@example.org", RegistrationStatus::Pending),
        ];
        let mut b = event(2, (2026, 8, 26));
        b.budget = 5_000.0;
        b.actual_cost = 6_500.0;
        b.registrations = vec![registration(2, "mary@example.org", RegistrationStatus::Confirmed)];

        let stats = compute_statistics(&[a, b], now());
        assert_eq!(stats.total_registrations, 3);
        assert_eq!(stats.total_budget, 30_000.0);
        assert_eq!(stats.total_spent, 18_500.0);
    }

    #[test]
    fn test_average_attendance_only_samples_bounded_events() {
        let mut bounded = event(1, (2026, 8, 25));
        bounded.registration_required = true;
        bounded.max_attendees = Some(10);
        bounded.registrations = vec![
            registration(1, "a@example.org", RegistrationStatus::Confirmed),
            registration(1, "b@example.org", RegistrationStatus::Confirmed),
            registration(1, "c@example.org", RegistrationStatus::Cancelled),
        ];

        let mut unbounded = event(2, (2026, 8, 26));
        unbounded.registration_required = true;
        unbounded.max_attendees = Some(0);
        unbounded.registrations = vec![registration(2, "d@example.org", RegistrationStatus::Confirmed)];

        let stats = compute_statistics(&[bounded, unbounded], now());
        // Only the bounded event is sampled: 2 live of 10 seats
        assert!((stats.average_attendance - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_attendance_defaults_to_zero() {
        let stats = compute_statistics(&[event(1, (2026, 8, 25))], now());
        assert_eq!(stats.average_attendance, 0.0);
    }
}
