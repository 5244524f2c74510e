//! Selection and view-mode state of the invited day list.
//!
//! The mode carries its own payload, so the pending-deletion set only exists
//! while deleting and is dropped on every other transition.

use super::event::{Event, EventDraft, EventId};
use crate::utils::i18n::ensure_locale;
use chrono::NaiveDate;
use rust_i18n::t;
use std::collections::HashSet;
use thiserror::Error;

/// Current interaction mode with its payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewMode {
    /// Browsing the day list
    #[default]
    List,
    /// Composing a new event for `date`
    Create { date: NaiveDate },
    /// Editing an existing event
    Update { event: Event },
    /// Bulk removal; `selected` holds the ids pending deletion
    Delete { selected: HashSet<EventId> },
}

/// Payload-free view of [`ViewMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewModeKind {
    List,
    Create,
    Update,
    Delete,
}

impl ViewMode {
    pub fn kind(&self) -> ViewModeKind {
        match self {
            ViewMode::List => ViewModeKind::List,
            ViewMode::Create { .. } => ViewModeKind::Create,
            ViewMode::Update { .. } => ViewModeKind::Update,
            ViewMode::Delete { .. } => ViewModeKind::Delete,
        }
    }
}

/// Everything the user can do on the invited page
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open or close the inline menu of a day
    ToggleMenu(NaiveDate),
    CloseMenu,
    /// Start composing a new event on a day
    Add(NaiveDate),
    /// Edit the event shown on a day
    Edit(NaiveDate),
    /// Enter bulk-delete mode from a day's menu
    EnterDelete(NaiveDate),
    /// Select or deselect every event of a day for deletion
    ToggleDeleteSelection(NaiveDate),
    ConfirmDelete,
    CancelDelete,
    /// Save the event being composed
    SaveNew(EventDraft),
    /// Save the event being edited
    SaveUpdate(Event),
    /// Leave create/update/delete without changes
    Cancel,
}

/// Store change caused by an accepted action
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// State changed, store untouched
    None,
    Created(Event),
    Updated(EventId),
    Deleted(usize),
    /// The action is not valid in the current mode
    Ignored,
}

/// User-visible refusal of an action. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no appointment to edit on {0}")]
    NothingToEdit(NaiveDate),
    #[error("no appointment to delete on {0}")]
    NothingToDelete(NaiveDate),
    #[error("no appointment selected for deletion")]
    NothingSelected,
}

impl Rejection {
    /// Localized alert text
    pub fn alert(&self) -> String {
        ensure_locale();
        match self {
            Rejection::NothingToEdit(_) => t!("alert_nothing_to_edit").to_string(),
            Rejection::NothingToDelete(_) => t!("alert_nothing_to_delete").to_string(),
            Rejection::NothingSelected => t!("alert_nothing_selected").to_string(),
        }
    }
}

/// Mode plus transient menu state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub(crate) mode: ViewMode,
    pub(crate) active_menu: Option<NaiveDate>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn view_mode(&self) -> ViewModeKind {
        self.mode.kind()
    }

    /// Day whose menu is open
    pub fn active_menu(&self) -> Option<NaiveDate> {
        self.active_menu
    }

    /// Day being composed for, in create mode
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match &self.mode {
            ViewMode::Create { date } => Some(*date),
            _ => None,
        }
    }

    /// Event being edited, in update mode
    pub fn selected_event(&self) -> Option<&Event> {
        match &self.mode {
            ViewMode::Update { event } => Some(event),
            _ => None,
        }
    }

    /// Ids pending deletion; always empty outside delete mode
    pub fn selected_delete_ids(&self) -> HashSet<EventId> {
        match &self.mode {
            ViewMode::Delete { selected } => selected.clone(),
            _ => HashSet::new(),
        }
    }

    pub fn is_selected_for_delete(&self, id: &EventId) -> bool {
        matches!(&self.mode, ViewMode::Delete { selected } if selected.contains(id))
    }

    /// Switch modes; the menu always closes
    pub(crate) fn transition(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.active_menu = None;
    }

    pub(crate) fn toggle_menu(&mut self, date: NaiveDate) -> Effect {
        if self.view_mode() == ViewModeKind::Delete {
            return Effect::Ignored;
        }
        self.active_menu = if self.active_menu == Some(date) {
            None
        } else {
            Some(date)
        };
        Effect::None
    }

    /// All-or-nothing toggle of the given ids in the deletion set
    pub(crate) fn toggle_delete_ids(&mut self, ids: &[EventId]) -> Effect {
        let ViewMode::Delete { selected } = &mut self.mode else {
            return Effect::Ignored;
        };
        if ids.is_empty() {
            return Effect::Ignored;
        }

        if ids.iter().all(|id| selected.contains(id)) {
            for id in ids {
                selected.remove(id);
            }
        } else {
            selected.extend(ids.iter().cloned());
        }
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new();
        assert_eq!(state.view_mode(), ViewModeKind::List);
        assert_eq!(state.active_menu(), None);
        assert!(state.selected_delete_ids().is_empty());
    }

    #[test]
    fn test_menu_toggles_and_closes_on_transition() {
        let mut state = SelectionState::new();
        state.toggle_menu(day(5));
        assert_eq!(state.active_menu(), Some(day(5)));
        state.toggle_menu(day(6));
        assert_eq!(state.active_menu(), Some(day(6)));
        state.toggle_menu(day(6));
        assert_eq!(state.active_menu(), None);

        state.toggle_menu(day(5));
        state.transition(ViewMode::Create { date: day(5) });
        assert_eq!(state.active_menu(), None);
        assert_eq!(state.selected_date(), Some(day(5)));
    }

    #[test]
    fn test_menu_suppressed_in_delete_mode() {
        let mut state = SelectionState::new();
        state.transition(ViewMode::Delete {
            selected: HashSet::new(),
        });
        assert_eq!(state.toggle_menu(day(5)), Effect::Ignored);
        assert_eq!(state.active_menu(), None);
    }

    #[test]
    fn test_toggle_delete_ids_all_or_nothing() {
        let mut state = SelectionState::new();
        state.transition(ViewMode::Delete {
            selected: HashSet::new(),
        });
        let ids = vec![EventId::Int(1), EventId::Int(2)];

        // Partially selected counts as not selected
        state.toggle_delete_ids(&ids[..1]);
        state.toggle_delete_ids(&ids);
        assert_eq!(state.selected_delete_ids().len(), 2);

        state.toggle_delete_ids(&ids);
        assert!(state.selected_delete_ids().is_empty());
    }

    #[test]
    fn test_toggle_delete_ids_outside_delete_mode() {
        let mut state = SelectionState::new();
        assert_eq!(state.toggle_delete_ids(&[EventId::Int(1)]), Effect::Ignored);
        assert!(state.selected_delete_ids().is_empty());
    }
}
