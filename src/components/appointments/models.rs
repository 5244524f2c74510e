use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle of an appointment on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Voting,
    Confirmed,
    Canceled,
}

/// Appointment record returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub name: String,
    pub invite_link: String,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub candidate_dates: Vec<NaiveDate>,
    /// Fields not interpreted here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /appointments/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub name: String,
    pub candidate_dates: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
}

/// Sidebar line for one appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub id: i64,
    pub name: String,
    pub invite_link: String,
    pub class_name: String,
}

impl From<&Appointment> for SidebarEntry {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            name: appointment.name.clone(),
            invite_link: appointment.invite_link.clone(),
            class_name: format!("yakssok-{}", appointment.id),
        }
    }
}

/// Result of one appointments fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<Appointment>),
    Failed(String),
}
