use super::event::{Event, EventId};
use crate::utils::i18n::ensure_locale;
use crate::utils::time::DateRange;
use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_i18n::t;

/// Separator between titles of events sharing a day
pub const TITLE_SEPARATOR: &str = ", ";

/// Result of matching a day against the event list
#[derive(Debug, Clone, PartialEq)]
pub enum DayMatch<'a> {
    /// No event starts on the day
    NoEvent,
    /// Events starting on the day, in source order
    Events(Vec<&'a Event>),
}

impl<'a> DayMatch<'a> {
    pub fn has_event(&self) -> bool {
        matches!(self, DayMatch::Events(_))
    }

    /// Joined titles, or `None` when the day has no event.
    /// An event with an empty title still yields `Some`.
    pub fn title(&self) -> Option<String> {
        match self {
            DayMatch::NoEvent => None,
            DayMatch::Events(events) => Some(
                events
                    .iter()
                    .map(|e| e.title.as_str())
                    .collect::<Vec<_>>()
                    .join(TITLE_SEPARATOR),
            ),
        }
    }

    /// Display text, with the localized sentinel for empty days
    pub fn label(&self) -> String {
        self.title().unwrap_or_else(|| {
            ensure_locale();
            t!("no_event").to_string()
        })
    }

    /// Ids of the matched events
    pub fn ids(&self) -> Vec<EventId> {
        match self {
            DayMatch::NoEvent => Vec::new(),
            DayMatch::Events(events) => events.iter().map(|e| e.id.clone()).collect(),
        }
    }

    pub fn events(&self) -> &[&'a Event] {
        match self {
            DayMatch::NoEvent => &[],
            DayMatch::Events(events) => events,
        }
    }
}

/// Events whose start falls on `day`. Missing or unparsable starts never match.
pub fn match_day(events: &[Event], day: NaiveDate, tz: Tz) -> DayMatch<'_> {
    let matched: Vec<&Event> = events.iter().filter(|e| e.is_on(day, tz)).collect();
    if matched.is_empty() {
        DayMatch::NoEvent
    } else {
        DayMatch::Events(matched)
    }
}

/// Event to open for editing: the first one on `day` whose title appears in
/// the title shown for that day
pub fn find_for_edit<'a>(
    events: &'a [Event],
    day: NaiveDate,
    shown_title: &str,
    tz: Tz,
) -> Option<&'a Event> {
    events
        .iter()
        .find(|e| e.is_on(day, tz) && shown_title.contains(e.title.as_str()))
}

/// Events whose start day lies within `range`
pub fn events_in_range<'a>(events: &'a [Event], range: &DateRange, tz: Tz) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.start_day(tz).is_some_and(|day| range.contains(day)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::invited::event::EventDraft;

    const TZ: Tz = chrono_tz::Asia::Seoul;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn event(id: i64, title: &str, start: Option<&str>) -> Event {
        EventDraft {
            title: title.to_string(),
            start: start.map(str::to_string),
            ..Default::default()
        }
        .into_event(EventId::Int(id))
    }

    #[test]
    fn test_single_match() {
        let events = vec![event(1, "A", Some("2025-11-05"))];
        let range = DateRange::new(day(2), day(8));

        for date in range.days() {
            let matched = match_day(&events, date, TZ);
            if date == day(5) {
                assert_eq!(matched.title(), Some("A".to_string()));
            } else {
                assert_eq!(matched, DayMatch::NoEvent);
                assert_eq!(matched.title(), None);
            }
        }
    }

    #[test]
    fn test_same_day_titles_joined_in_source_order() {
        let events = vec![
            event(1, "B", Some("2025-11-05T18:00:00")),
            event(2, "other day", Some("2025-11-06")),
            event(3, "A", Some("2025-11-05")),
        ];

        let matched = match_day(&events, day(5), TZ);
        assert_eq!(matched.title(), Some("B, A".to_string()));
        assert_eq!(matched.ids(), vec![EventId::Int(1), EventId::Int(3)]);
    }

    #[test]
    fn test_empty_title_is_not_no_event() {
        let events = vec![event(1, "", Some("2025-11-05"))];
        let matched = match_day(&events, day(5), TZ);
        assert!(matched.has_event());
        assert_eq!(matched.title(), Some(String::new()));
    }

    #[test]
    fn test_bad_starts_never_match() {
        let events = vec![event(1, "missing", None), event(2, "broken", Some("soon"))];
        for date in DateRange::new(day(1), day(30)).days() {
            assert_eq!(match_day(&events, date, TZ), DayMatch::NoEvent);
        }
    }

    #[test]
    fn test_matching_is_idempotent() {
        let events = vec![event(1, "A", Some("2025-11-05")), event(2, "B", Some("2025-11-05"))];
        assert_eq!(match_day(&events, day(5), TZ), match_day(&events, day(5), TZ));
    }

    #[test]
    fn test_find_for_edit() {
        let events = vec![event(1, "A", Some("2025-11-05")), event(2, "B", Some("2025-11-05"))];
        let shown = match_day(&events, day(5), TZ).label();

        let found = find_for_edit(&events, day(5), &shown, TZ).unwrap();
        assert_eq!(found.id, EventId::Int(1));
        assert!(find_for_edit(&events, day(6), &shown, TZ).is_none());
    }

    #[test]
    fn test_events_in_range() {
        let events = vec![
            event(1, "before", Some("2025-11-01")),
            event(2, "inside", Some("2025-11-02")),
            event(3, "inside", Some("2025-11-08T23:00:00")),
            event(4, "after", Some("2025-11-09")),
            event(5, "none", None),
        ];

        let inside = events_in_range(&events, &DateRange::new(day(2), day(8)), TZ);
        let ids: Vec<_> = inside.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![EventId::Int(2), EventId::Int(3)]);
    }
}
