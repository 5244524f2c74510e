use super::event::{Event, EventDraft};
use super::matcher::{events_in_range, find_for_edit, match_day};
use super::state::{Action, Effect, Rejection, SelectionState, ViewMode, ViewModeKind};
use super::store::EventStore;
use crate::components::appointments::Appointment;
use crate::error::{invited_error, AppResult};
use crate::utils::time::DateRange;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// One line of the invited day list
#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub date: NaiveDate,
    pub day_number: u32,
    /// Joined titles, or the no-event sentinel
    pub label: String,
    pub has_event: bool,
    pub menu_open: bool,
    pub selected_for_delete: bool,
}

/// State of a guest's invited page: the range, their events and the current mode
#[derive(Debug, Clone)]
pub struct InvitedSession {
    party_name: String,
    range: DateRange,
    days: Vec<NaiveDate>,
    store: EventStore,
    selection: SelectionState,
    tz: Tz,
}

impl InvitedSession {
    /// Start a session over `range` with the events handed over by navigation
    pub fn new(
        party_name: impl Into<String>,
        range: DateRange,
        payload: Vec<EventDraft>,
        tz: Tz,
        now: DateTime<Utc>,
    ) -> Self {
        let store = EventStore::from_payload(payload, now);
        let days = range.days();
        let party_name = party_name.into();
        info!(
            "Invited session for '{}': {} days, {} events",
            party_name,
            days.len(),
            store.len()
        );

        Self {
            party_name,
            range,
            days,
            store,
            selection: SelectionState::new(),
            tz,
        }
    }

    /// Start a session whose name and range come from an appointment's candidate dates
    pub fn for_appointment(
        appointment: &Appointment,
        payload: Vec<EventDraft>,
        tz: Tz,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let range = DateRange::from_candidate_dates(&appointment.candidate_dates).ok_or_else(|| {
            invited_error(&format!(
                "Appointment '{}' has no candidate dates",
                appointment.name
            ))
        })?;
        Ok(Self::new(appointment.name.clone(), range, payload, tz, now))
    }

    pub fn party_name(&self) -> &str {
        &self.party_name
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Days of the range, computed once
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn view_mode(&self) -> ViewModeKind {
        self.selection.view_mode()
    }

    /// Events that fall inside the range
    pub fn events_in_range(&self) -> Vec<&Event> {
        events_in_range(self.store.events(), &self.range, self.tz)
    }

    /// Title shown for `day`, `None` when the day has no event
    pub fn title_for(&self, day: NaiveDate) -> Option<String> {
        match_day(self.store.events(), day, self.tz).title()
    }

    /// Apply one user action. Rejected actions leave everything unchanged.
    pub fn update(&mut self, action: Action) -> Result<Effect, Rejection> {
        let mode = self.selection.view_mode();
        debug!("Invited action {:?} in {:?} mode", action, mode);

        let effect = match (mode, action) {
            (_, Action::CloseMenu) => {
                self.selection.active_menu = None;
                Effect::None
            }
            (_, Action::ToggleMenu(date)) => self.selection.toggle_menu(date),

            (ViewModeKind::List, Action::Add(date)) => {
                self.selection.transition(ViewMode::Create { date });
                Effect::None
            }
            (ViewModeKind::List, Action::Edit(date)) => {
                let shown = self
                    .title_for(date)
                    .ok_or(Rejection::NothingToEdit(date))?;
                let event = find_for_edit(self.store.events(), date, &shown, self.tz)
                    .cloned()
                    .ok_or(Rejection::NothingToEdit(date))?;
                self.selection.transition(ViewMode::Update { event });
                Effect::None
            }
            (ViewModeKind::List, Action::EnterDelete(date)) => {
                if !self.has_event_on(date) {
                    return Err(Rejection::NothingToDelete(date));
                }
                self.selection.transition(ViewMode::Delete {
                    selected: HashSet::new(),
                });
                Effect::None
            }

            (ViewModeKind::Delete, Action::ToggleDeleteSelection(date)) => {
                let ids = match_day(self.store.events(), date, self.tz).ids();
                self.selection.toggle_delete_ids(&ids)
            }
            (ViewModeKind::Delete, Action::ConfirmDelete) => {
                let selected = self.selection.selected_delete_ids();
                if selected.is_empty() {
                    return Err(Rejection::NothingSelected);
                }
                let removed = self.store.remove_ids(&selected);
                self.selection.transition(ViewMode::List);
                info!("Deleted {} events", removed);
                Effect::Deleted(removed)
            }
            (ViewModeKind::Delete, Action::CancelDelete | Action::Cancel) => {
                self.selection.transition(ViewMode::List);
                Effect::None
            }

            (ViewModeKind::Create, Action::SaveNew(mut draft)) => {
                if draft.start.is_none() {
                    draft.start = self
                        .selection
                        .selected_date()
                        .map(|date| date.format("%Y-%m-%d").to_string());
                }
                let event = self.store.add(draft);
                self.selection.transition(ViewMode::List);
                Effect::Created(event)
            }
            (ViewModeKind::Update, Action::SaveUpdate(event)) => {
                let Some(id) = self.selection.selected_event().map(|e| e.id.clone()) else {
                    return Ok(Effect::Ignored);
                };
                let replaced = self.store.replace(&id, event);
                self.selection.transition(ViewMode::List);
                if replaced {
                    Effect::Updated(id)
                } else {
                    warn!("Event {} is no longer in the store, update dropped", id);
                    Effect::Ignored
                }
            }
            (ViewModeKind::Create | ViewModeKind::Update, Action::Cancel) => {
                self.selection.transition(ViewMode::List);
                Effect::None
            }

            (mode, action) => {
                debug!("Ignoring {:?} in {:?} mode", action, mode);
                Effect::Ignored
            }
        };

        Ok(effect)
    }

    /// The day list as the page renders it
    pub fn rows(&self) -> Vec<DayRow> {
        let in_delete = self.view_mode() == ViewModeKind::Delete;

        self.days
            .iter()
            .map(|&date| {
                let matched = match_day(self.store.events(), date, self.tz);
                let selected_for_delete = in_delete
                    && matched
                        .events()
                        .iter()
                        .any(|e| self.selection.is_selected_for_delete(&e.id));

                DayRow {
                    date,
                    day_number: date.day(),
                    label: matched.label(),
                    has_event: matched.has_event(),
                    menu_open: !in_delete && self.selection.active_menu() == Some(date),
                    selected_for_delete,
                }
            })
            .collect()
    }

    fn has_event_on(&self, day: NaiveDate) -> bool {
        match_day(self.store.events(), day, self.tz).has_event()
    }
}
