//! Filter & query engine
//!
//! Pure projection of the event store given search text and facet filters.
//! Filtering is always a read: the result is a cloned subset of the input in
//! the input's relative order, except the upcoming view which re-sorts
//! ascending by start instant.

use chrono::{Datelike, NaiveDateTime};

use crate::models::{Event, EventCategory, EventStatus};

/// Calendar window facet.
///
/// All comparisons operate on calendar dates, not instants, so a late-evening
/// event never slips into the wrong day through timezone arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
    Upcoming,
}

/// Facet filter set; `None` facets match everything
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive substring over title, description, or organizer
    pub search_term: Option<String>,
    pub category: Option<EventCategory>,
    pub status: Option<EventStatus>,
    pub date_range: DateRange,
}

impl EventFilter {
    pub fn with_search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn with_category(category: EventCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn with_status(status: EventStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_date_range(date_range: DateRange) -> Self {
        Self {
            date_range,
            ..Self::default()
        }
    }
}

/// Produce the filtered projection of `events` as of `now`.
///
/// Facets compose by logical AND. The input collection is never mutated.
pub fn filter_events(events: &[Event], filter: &EventFilter, now: NaiveDateTime) -> Vec<Event> {
    let mut result: Vec<Event> = events
        .iter()
        .filter(|event| matches_filter(event, filter, now))
        .cloned()
        .collect();

    if filter.date_range == DateRange::Upcoming {
        result.sort_by_key(|event| event.start_instant());
    }

    result
}

fn matches_filter(event: &Event, filter: &EventFilter, now: NaiveDateTime) -> bool {
    matches_search(event, filter.search_term.as_deref())
        && filter.category.map_or(true, |c| event.category == c)
        && filter.status.map_or(true, |s| event.status == s)
        && matches_date_range(event, filter.date_range, now)
}

fn matches_search(event: &Event, term: Option<&str>) -> bool {
    let term = match term {
        Some(t) if !t.trim().is_empty() => t.trim().to_lowercase(),
        _ => return true,
    };

    let haystacks = [
        Some(event.title.as_str()),
        event.description.as_deref(),
        event.organizer.as_deref(),
    ];

    haystacks
        .iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(&term))
}

fn matches_date_range(event: &Event, range: DateRange, now: NaiveDateTime) -> bool {
    let today = now.date();
    match range {
        DateRange::All => true,
        DateRange::Today => event.start_date == today,
        DateRange::ThisWeek => {
            let event_week = event.start_date.iso_week();
            let current_week = today.iso_week();
            event_week.year() == current_week.year() && event_week.week() == current_week.week()
        }
        DateRange::ThisMonth => {
            event.start_date.year() == today.year() && event.start_date.month() == today.month()
        }
        DateRange::Upcoming => event.start_instant() > now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use proptest::prelude::*;

    use crate::models::RecurrencePattern;

    fn event(id: i64, title: &str, category: EventCategory, date: (i32, u32, u32)) -> Event {
        Event {
            id,
            code: format!("EVT-TEST-{:04}", id),
            title: title.to_string(),
            description: None,
            category,
            location: None,
            organizer: None,
            contact_email: None,
            contact_phone: None,
            start_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            end_date: None,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: None,
            is_recurring: false,
            recurrence: None::<RecurrencePattern>,
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

    fn now() -> NaiveDateTime {
        // A Wednesday
        NaiveDate::from_ymd_opt(2026, 8, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_filter_matches_all_in_order() {
        let events = vec![
            event(1, "Sunday Service", EventCategory::SundayService, (2026, 8, 23)),
            event(2, "Bible Study", EventCategory::BibleStudy, (2026, 8, 20)),
        ];

        let result = filter_events(&events, &EventFilter::default(), now());
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut by_description = event(2, "Midweek", EventCategory::MidweekService, (2026, 8, 20));
        by_description.description = Some("Worship night with the youth band".to_string());
        let mut by_organizer = event(3, "Retreat", EventCategory::Other, (2026, 9, 5));
        by_organizer.organizer = Some("Youth Committee".to_string());
        let events = vec![
            event(1, "Youth Fellowship", EventCategory::YouthFellowship, (2026, 8, 21)),
            by_description,
            by_organizer,
            event(4, "Choir Practice", EventCategory::ChoirPractice, (2026, 8, 22)),
        ];

        let result = filter_events(&events, &EventFilter::with_search("YOUTH"), now());
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_blank_search_matches_all() {
        let events = vec![event(1, "Seminar", EventCategory::Seminar, (2026, 8, 20))];
        let result = filter_events(&events, &EventFilter::with_search("   "), now());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_category_exact_match() {
        let events = vec![
            event(1, "Morning Study", EventCategory::BibleStudy, (2026, 8, 20)),
            event(2, "Annual Conference", EventCategory::Conference, (2026, 9, 1)),
        ];

        let result = filter_events(
            &events,
            &EventFilter::with_category(EventCategory::BibleStudy),
            now(),
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_today_window_is_calendar_day_equality() {
        let events = vec![
            event(1, "Today", EventCategory::Other, (2026, 8, 19)),
            event(2, "Tomorrow", EventCategory::Other, (2026, 8, 20)),
        ];

        let result = filter_events(&events, &EventFilter::with_date_range(DateRange::Today), now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_week_window_uses_iso_week_containment() {
        // 2026-08-19 falls in the ISO week of Mon 17th .. Sun 23rd
        let events = vec![
            event(1, "Monday", EventCategory::Other, (2026, 8, 17)),
            event(2, "Sunday", EventCategory::Other, (2026, 8, 23)),
            event(3, "Next Monday", EventCategory::Other, (2026, 8, 24)),
            event(4, "Last Sunday", EventCategory::Other, (2026, 8, 16)),
        ];

        let result = filter_events(
            &events,
            &EventFilter::with_date_range(DateRange::ThisWeek),
            now(),
        );
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_month_window() {
        let events = vec![
            event(1, "August", EventCategory::Other, (2026, 8, 1)),
            event(2, "September", EventCategory::Other, (2026, 9, 1)),
            event(3, "Last August", EventCategory::Other, (2025, 8, 19)),
        ];

        let result = filter_events(
            &events,
            &EventFilter::with_date_range(DateRange::ThisMonth),
            now(),
        );
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_upcoming_is_strict_and_sorted() {
        let mut later_today = event(1, "Evening Prayer", EventCategory::PrayerMeeting, (2026, 8, 19));
        later_today.start_time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        let events = vec![
            event(2, "Next Month", EventCategory::Other, (2026, 9, 10)),
            later_today,
            event(3, "This Morning", EventCategory::Other, (2026, 8, 19)),
            event(4, "Next Week", EventCategory::Other, (2026, 8, 25)),
        ];

        let result = filter_events(
            &events,
            &EventFilter::with_date_range(DateRange::Upcoming),
            now(),
        );
        let ids: Vec<i64> = result.iter().map(|e| e.id).collect();
        // id 3 started at 10:00, before the 12:00 "now"; the rest sort by start
        assert_eq!(ids, vec![1, 4, 2]);
    }

    #[test]
    fn test_facets_compose_with_and() {
        let mut matching = event(1, "Harvest Fundraiser", EventCategory::Fundraiser, (2026, 8, 19));
        matching.status = EventStatus::InProgress;
        let mut wrong_status = event(2, "Spring Fundraiser", EventCategory::Fundraiser, (2026, 8, 19));
        wrong_status.status = EventStatus::Completed;
        let events = vec![
            matching,
            wrong_status,
            event(3, "Harvest Outreach", EventCategory::Outreach, (2026, 8, 19)),
        ];

        let filter = EventFilter {
            search_term: Some("fundraiser".to_string()),
            category: Some(EventCategory::Fundraiser),
            status: Some(EventStatus::InProgress),
            date_range: DateRange::Today,
        };

        let result = filter_events(&events, &filter, now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    proptest! {
        /// The result is a subset of the input in the original order (modulo
        /// the upcoming re-sort) and filtering is idempotent.
        #[test]
        fn prop_filter_subset_order_idempotent(
            titles in proptest::collection::vec("[a-z]{0,8}", 0..12),
            term in proptest::option::of("[a-z]{0,3}"),
            day_offsets in proptest::collection::vec(0u32..60, 0..12),
        ) {
            let base = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
            let events: Vec<Event> = titles
                .iter()
                .zip(day_offsets.iter().chain(std::iter::repeat(&0)))
                .enumerate()
                .map(|(i, (title, offset))| {
                    let date = base + chrono::Duration::days(*offset as i64);
                    event(i as i64, title, EventCategory::Other, (date.year(), date.month(), date.day()))
                })
                .collect();

            let filter = EventFilter {
                search_term: term,
                category: None,
                status: None,
                date_range: DateRange::All,
            };

            let once = filter_events(&events, &filter, now());

            // Subset, in input order
            let input_ids: Vec<i64> = events.iter().map(|e| e.id).collect();
            let mut cursor = 0usize;
            for kept in &once {
                let pos = input_ids[cursor..]
                    .iter()
                    .position(|id| *id == kept.id)
                    .expect("filter result must be drawn from the input");
                cursor += pos + 1;
            }

            // Idempotent
            let twice = filter_events(&once, &filter, now());
            let once_ids: Vec<i64> = once.iter().map(|e| e.id).collect();
            let twice_ids: Vec<i64> = twice.iter().map(|e| e.id).collect();
            prop_assert_eq!(once_ids, twice_ids);
        }
    }
}
