use crate::utils::time::parse_day;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque event identifier: the API hands out integers, the client mints strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(id) => write!(f, "{}", id),
            EventId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        EventId::Int(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId::Text(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        EventId::Text(id)
    }
}

/// An availability record held by the event store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    /// Fields this crate does not interpret, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Calendar day of `start`, if it parses
    pub fn start_day(&self, tz: Tz) -> Option<NaiveDate> {
        self.start.as_deref().and_then(|raw| parse_day(raw, tz))
    }

    /// Whether the event starts on `day`
    pub fn is_on(&self, day: NaiveDate, tz: Tz) -> bool {
        self.start_day(tz) == Some(day)
    }
}

/// An event that may not have an id yet: navigation payloads and new entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventDraft {
    /// Draft with a title on a given day
    pub fn new(title: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            title: title.into(),
            start: Some(day.format("%Y-%m-%d").to_string()),
            ..Default::default()
        }
    }

    /// Attach an id, turning the draft into a store event
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            invite_link: self.invite_link,
            extra: self.extra,
        }
    }
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        Self {
            id: Some(event.id),
            title: event.title,
            start: event.start,
            end: event.end,
            invite_link: event.invite_link,
            extra: event.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_id_accepts_numbers_and_strings() {
        let ids: Vec<EventId> = serde_json::from_value(json!([1, "generated-0-42"])).unwrap();
        assert_eq!(ids, vec![EventId::Int(1), EventId::from("generated-0-42")]);
        assert_eq!(ids[0].to_string(), "1");
        assert_eq!(ids[1].to_string(), "generated-0-42");
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({
            "id": 7,
            "title": "점심",
            "start": "2025-11-05T12:00:00",
            "className": "yakssok-7",
            "color": "#BBCEA0"
        });

        let event: Event = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(event.extra.get("className"), Some(&json!("yakssok-7")));
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }

    #[test]
    fn test_start_day() {
        let tz = chrono_tz::Asia::Seoul;
        let mut draft = EventDraft::new("A", NaiveDate::from_ymd_opt(2025, 11, 5).unwrap());
        assert_eq!(draft.start.as_deref(), Some("2025-11-05"));

        draft.start = Some("garbage".to_string());
        let event = draft.into_event(EventId::Int(1));
        assert_eq!(event.start_day(tz), None);
    }
}
