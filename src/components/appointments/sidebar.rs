use super::models::{FetchOutcome, SidebarEntry};
use crate::utils::i18n::ensure_locale;
use rust_i18n::t;
use tracing::error;

/// Appointment list shown next to every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sidebar {
    entries: Vec<SidebarEntry>,
    error: Option<String>,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take in a finished fetch. A failure empties the list and sets the error message.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(appointments) => {
                self.entries = appointments.iter().map(SidebarEntry::from).collect();
                self.error = None;
            }
            FetchOutcome::Failed(reason) => {
                error!("Appointment list unavailable: {}", reason);
                self.entries.clear();
                ensure_locale();
                self.error = Some(t!("error_fetch_appointments").to_string());
            }
        }
    }

    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    /// User-visible error from the last fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
