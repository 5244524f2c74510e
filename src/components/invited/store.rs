use super::event::{Event, EventDraft, EventId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Authoritative in-memory list of events for one session.
///
/// Ids are unique at all times; every mutation goes through this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a navigation payload.
    ///
    /// Drafts without an id, or whose id is already taken, get
    /// `generated-<index>-<unix millis>`.
    pub fn from_payload(drafts: Vec<EventDraft>, now: DateTime<Utc>) -> Self {
        let stamp = now.timestamp_millis();
        let mut store = Self::new();

        for (index, mut draft) in drafts.into_iter().enumerate() {
            let id = match draft.id.take() {
                Some(id) if !store.contains(&id) => id,
                _ => {
                    let mut generated = EventId::Text(format!("generated-{}-{}", index, stamp));
                    while store.contains(&generated) {
                        generated = Self::fresh_id();
                    }
                    generated
                }
            };
            store.events.push(draft.into_event(id));
        }

        store
    }

    /// Append a draft under a freshly minted id and return the stored event
    pub fn add(&mut self, draft: EventDraft) -> Event {
        let mut id = Self::fresh_id();
        while self.contains(&id) {
            id = Self::fresh_id();
        }

        let event = draft.into_event(id);
        debug!("Adding event {} ({})", event.id, event.title);
        self.events.push(event.clone());
        event
    }

    /// Replace the first event carrying `id`. Returns false when nothing matched.
    pub fn replace(&mut self, id: &EventId, mut event: Event) -> bool {
        match self.events.iter_mut().find(|e| &e.id == id) {
            Some(slot) => {
                event.id = id.clone();
                *slot = event;
                true
            }
            None => {
                debug!("Replace skipped, no event with id {}", id);
                false
            }
        }
    }

    /// Remove every event whose id is in `ids`, returning how many were removed
    pub fn remove_ids(&mut self, ids: &HashSet<EventId>) -> usize {
        let before = self.events.len();
        self.events.retain(|e| !ids.contains(&e.id));
        before - self.events.len()
    }

    /// All events in insertion order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Look up an event by id
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Whether an event with `id` exists
    pub fn contains(&self, id: &EventId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn fresh_id() -> EventId {
        EventId::Text(Uuid::new_v4().to_string())
    }
}
