use super::client::AppointmentApi;
use super::models::{Appointment, NewAppointment};
use crate::error::{appointments_error, AppResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The appointments actor that serializes API requests
pub struct AppointmentsActor {
    api: Arc<dyn AppointmentApi>,
    command_rx: mpsc::Receiver<AppointmentsCommand>,
}

/// Commands that can be sent to the appointments actor
pub enum AppointmentsCommand {
    List(mpsc::Sender<AppResult<Vec<Appointment>>>),
    ByInviteCode(String, mpsc::Sender<AppResult<Appointment>>),
    Create(NewAppointment, mpsc::Sender<AppResult<Appointment>>),
    Shutdown,
}

/// Handle for communicating with the appointments actor
#[derive(Clone)]
pub struct AppointmentsActorHandle {
    command_tx: mpsc::Sender<AppointmentsCommand>,
}

impl AppointmentsActorHandle {
    /// List the user's appointments
    pub async fn list(&self) -> AppResult<Vec<Appointment>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(AppointmentsCommand::List(response_tx))
            .await
            .map_err(|e| appointments_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| appointments_error("Response channel closed"))?
    }

    /// Look up an appointment by invite code
    pub async fn by_invite_code(&self, invite_code: impl Into<String>) -> AppResult<Appointment> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(AppointmentsCommand::ByInviteCode(invite_code.into(), response_tx))
            .await
            .map_err(|e| appointments_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| appointments_error("Response channel closed"))?
    }

    /// Create an appointment
    pub async fn create(&self, request: NewAppointment) -> AppResult<Appointment> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(AppointmentsCommand::Create(request, response_tx))
            .await
            .map_err(|e| appointments_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| appointments_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(AppointmentsCommand::Shutdown).await;
        Ok(())
    }
}

impl AppointmentsActor {
    /// Create a new actor and return its handle
    pub fn new(api: Arc<dyn AppointmentApi>) -> (Self, AppointmentsActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self { api, command_rx };
        let handle = AppointmentsActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Appointments actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                AppointmentsCommand::List(response_tx) => {
                    let result = self.api.list_appointments().await;
                    match &result {
                        Ok(appointments) => info!("Fetched {} appointments", appointments.len()),
                        Err(e) => error!("Failed to fetch appointments: {}", e),
                    }
                    // The caller may have gone away; its result is simply dropped
                    let _ = response_tx.send(result).await;
                }
                AppointmentsCommand::ByInviteCode(invite_code, response_tx) => {
                    let result = self.api.appointment_by_invite_code(&invite_code).await;
                    if let Err(e) = &result {
                        error!("Failed to fetch appointment '{}': {}", invite_code, e);
                    }
                    let _ = response_tx.send(result).await;
                }
                AppointmentsCommand::Create(request, response_tx) => {
                    let result = self.api.create_appointment(&request).await;
                    match &result {
                        Ok(appointment) => info!(
                            "Created appointment {} with invite code {}",
                            appointment.id, appointment.invite_link
                        ),
                        Err(e) => error!("Failed to create appointment '{}': {}", request.name, e),
                    }
                    let _ = response_tx.send(result).await;
                }
                AppointmentsCommand::Shutdown => {
                    info!("Appointments actor shutting down");
                    break;
                }
            }
        }

        info!("Appointments actor shut down");
    }
}
