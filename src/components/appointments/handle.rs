use super::actor::{AppointmentsActor, AppointmentsActorHandle};
use super::client::AppointmentApi;
use super::models::{Appointment, FetchOutcome, NewAppointment};
use crate::error::AppResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the appointments actor
#[derive(Clone)]
pub struct AppointmentsHandle {
    actor_handle: AppointmentsActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl AppointmentsHandle {
    /// Create a new AppointmentsHandle and spawn the actor
    pub fn new(api: Arc<dyn AppointmentApi>) -> Self {
        let (mut actor, handle) = AppointmentsActor::new(api);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// List the user's appointments
    pub async fn list(&self) -> AppResult<Vec<Appointment>> {
        self.actor_handle.list().await
    }

    /// Single-shot fetch for the sidebar, folded into an explicit outcome
    pub async fn load_sidebar(&self) -> FetchOutcome {
        match self.list().await {
            Ok(appointments) => FetchOutcome::Loaded(appointments),
            Err(e) => FetchOutcome::Failed(e.to_string()),
        }
    }

    /// Look up an appointment by invite code
    pub async fn by_invite_code(&self, invite_code: impl Into<String>) -> AppResult<Appointment> {
        self.actor_handle.by_invite_code(invite_code).await
    }

    /// Create an appointment
    pub async fn create(&self, request: NewAppointment) -> AppResult<Appointment> {
        self.actor_handle.create(request).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}
