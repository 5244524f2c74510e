use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;
use yakssok::components::appointments::{
    Appointment, AppointmentApi, Appointments, FetchOutcome, NewAppointment, Sidebar,
};
use yakssok::components::ComponentManager;
use yakssok::config::Config;
use yakssok::error::{appointments_error, AppResult};

/// Mock implementation of the appointments API for testing
#[derive(Debug, Clone, Default)]
struct MockAppointmentApi {
    appointments: Vec<Appointment>,
}

impl MockAppointmentApi {
    /// Create a new mock with predefined appointments
    fn new() -> Self {
        let appointments = vec![serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "졸업 프로젝트",
            "invite_link": "GRAD7",
            "candidate_dates": ["2025-11-03", "2025-11-07"]
        }))
        .unwrap()];

        Self { appointments }
    }
}

#[async_trait]
impl AppointmentApi for MockAppointmentApi {
    async fn list_appointments(&self) -> AppResult<Vec<Appointment>> {
        Ok(self.appointments.clone())
    }

    async fn appointment_by_invite_code(&self, invite_code: &str) -> AppResult<Appointment> {
        self.appointments
            .iter()
            .find(|a| a.invite_link == invite_code)
            .cloned()
            .ok_or_else(|| appointments_error("unknown invite code"))
    }

    async fn create_appointment(&self, request: &NewAppointment) -> AppResult<Appointment> {
        Ok(serde_json::from_value(serde_json::json!({
            "id": 8,
            "name": request.name,
            "invite_link": "NEW8",
            "candidate_dates": request.candidate_dates,
        }))?)
    }
}

fn test_config() -> Config {
    Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        token_path: ".yakssok/access_token".into(),
        timezone: "Asia/Seoul".to_string(),
        locale: "ko".to_string(),
        max_events_per_day: 2,
        request_timeout_secs: 1,
    }
}

/// Smoke test to verify that the config can be built and its zone parsed
#[tokio::test]
async fn test_config_loads() {
    let config = test_config();

    assert_eq!(config.max_events_per_day, 2);
    assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Seoul);
}

/// The component manager hands out the appointments handle after init
#[tokio::test]
async fn test_component_lifecycle() {
    let config = Arc::new(RwLock::new(test_config()));
    let mut manager = ComponentManager::new(Arc::clone(&config));
    manager.register(Appointments::with_api(Arc::new(MockAppointmentApi::new())));

    assert!(manager.init_all().await.is_ok());
    assert!(manager.get_component_by_name("appointments").is_some());

    let handle = manager
        .get::<Appointments>()
        .unwrap()
        .get_handle()
        .await
        .unwrap();

    let mut sidebar = Sidebar::new();
    sidebar.apply(handle.load_sidebar().await);
    assert_eq!(sidebar.entries().len(), 1);
    assert_eq!(sidebar.entries()[0].class_name, "yakssok-7");

    assert!(manager.shutdown_all().await.is_ok());
}

/// Requests go through the actor and come back unchanged
#[tokio::test]
async fn test_handle_roundtrip_through_actor() {
    let component = Appointments::with_api(Arc::new(MockAppointmentApi::new()));
    let handle = component.get_handle().await.unwrap();

    let found = handle.by_invite_code("GRAD7").await.unwrap();
    assert_eq!(found.id, 7);
    assert!(handle.by_invite_code("NOPE").await.is_err());

    let created = handle
        .create(NewAppointment {
            name: "스터디".to_string(),
            candidate_dates: vec![NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()],
            max_participants: Some(4),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "스터디");
    assert_eq!(created.candidate_dates.len(), 1);

    match handle.load_sidebar().await {
        FetchOutcome::Loaded(list) => assert_eq!(list.len(), 1),
        FetchOutcome::Failed(reason) => panic!("unexpected failure: {}", reason),
    }

    assert!(handle.shutdown().await.is_ok());
}
