use crate::components::invited::{match_day, Event, EventId};
use crate::utils::time::{classify_day, DayClass};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

/// Event in the shape the calendar widget consumes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: EventId,
    pub title: String,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub class_name: String,
}

/// Map store events to widget entries. Events without a start cannot be placed and are skipped.
pub fn to_calendar_entries(events: &[Event]) -> Vec<CalendarEntry> {
    events
        .iter()
        .filter_map(|event| {
            let start = event.start.clone()?;
            Some(CalendarEntry {
                id: event.id.clone(),
                title: event.title.clone(),
                start,
                end: event.end.clone(),
                class_name: format!("yakssok-{}", event.id),
            })
        })
        .collect()
}

/// Cell decoration picked from the day's position relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    Today,
    Past,
    Future,
}

impl StyleToken {
    pub fn for_class(class: DayClass) -> Self {
        match class {
            DayClass::Today => StyleToken::Today,
            DayClass::Past => StyleToken::Past,
            DayClass::Future => StyleToken::Future,
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            StyleToken::Today => "#F9CBAA",
            StyleToken::Past => "#EAEEE0",
            StyleToken::Future => "#BBCEA0",
        }
    }

    pub fn text_color(&self) -> &'static str {
        match self {
            StyleToken::Today => "#FFFFFF",
            StyleToken::Past => "#C4C5B7",
            StyleToken::Future => "#FFFFFF",
        }
    }
}

/// Rendered content of one month-grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_number: u32,
    pub class: DayClass,
    /// Only set when the day has events
    pub style: Option<StyleToken>,
    /// Titles to render, at most the configured cap
    pub titles: Vec<String>,
    /// Number of events on the day
    pub total: usize,
}

impl DayCell {
    /// Events on the day that are counted but not rendered
    pub fn hidden(&self) -> usize {
        self.total - self.titles.len()
    }
}

/// Decorate `day` for the month grid.
///
/// Titles are truncated to `max_per_day` with no "+N more" marker.
pub fn decorate_day(
    events: &[Event],
    day: NaiveDate,
    today: NaiveDate,
    max_per_day: usize,
    tz: Tz,
) -> DayCell {
    let matched = match_day(events, day, tz);
    let class = classify_day(day, today);
    let day_events = matched.events();

    DayCell {
        date: day,
        day_number: day.day(),
        class,
        style: matched.has_event().then(|| StyleToken::for_class(class)),
        titles: day_events
            .iter()
            .take(max_per_day)
            .map(|e| e.title.clone())
            .collect(),
        total: day_events.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::invited::EventDraft;

    const TZ: Tz = chrono_tz::Asia::Seoul;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn events_on_fifth(count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| EventDraft::new(format!("E{}", i), day(5)).into_event(EventId::Int(i as i64)))
            .collect()
    }

    #[test]
    fn test_cap_truncates_titles() {
        let events = events_on_fifth(4);
        let cell = decorate_day(&events, day(5), day(5), 2, TZ);

        assert_eq!(cell.titles, vec!["E0".to_string(), "E1".to_string()]);
        assert_eq!(cell.total, 4);
        assert_eq!(cell.hidden(), 2);
        assert_eq!(cell.style, Some(StyleToken::Today));
    }

    #[test]
    fn test_cap_is_configurable() {
        let events = events_on_fifth(4);
        let cell = decorate_day(&events, day(5), day(1), 3, TZ);
        assert_eq!(cell.titles.len(), 3);
        assert_eq!(cell.hidden(), 1);
        assert_eq!(cell.style, Some(StyleToken::Future));
    }

    #[test]
    fn test_empty_day_has_no_style() {
        let events = events_on_fifth(1);
        let cell = decorate_day(&events, day(4), day(10), 2, TZ);
        assert_eq!(cell.class, DayClass::Past);
        assert_eq!(cell.style, None);
        assert!(cell.titles.is_empty());
        assert_eq!(cell.hidden(), 0);
    }

    #[test]
    fn test_style_colors() {
        assert_eq!(StyleToken::Today.background(), "#F9CBAA");
        assert_eq!(StyleToken::Past.text_color(), "#C4C5B7");
        assert_eq!(StyleToken::Future.background(), "#BBCEA0");
    }

    #[test]
    fn test_calendar_entries_skip_missing_start() {
        let mut events = events_on_fifth(1);
        events.push(
            EventDraft {
                title: "floating".to_string(),
                ..Default::default()
            }
            .into_event(EventId::from("x")),
        );

        let entries = to_calendar_entries(&events);
        assert_eq!(entries.len(), 1);

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["className"], "yakssok-0");
        assert_eq!(json["start"], "2025-11-05");
        assert!(json.get("end").is_none());
    }
}
