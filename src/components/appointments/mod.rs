mod actor;
pub mod client;
mod handle;
pub mod models;
pub mod sidebar;
pub mod token;

pub use client::{AppointmentApi, AppointmentsClient};
pub use handle::AppointmentsHandle;
pub use models::{Appointment, AppointmentStatus, FetchOutcome, NewAppointment, SidebarEntry};
pub use sidebar::Sidebar;
pub use token::TokenStore;

use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Appointments component: owns the API actor for the session
#[derive(Default)]
pub struct Appointments {
    handle: RwLock<Option<AppointmentsHandle>>,
}

impl Appointments {
    /// Create a new appointments component
    pub fn new() -> Self {
        Self {
            handle: RwLock::new(None),
        }
    }

    /// Create the component around an existing API implementation
    pub fn with_api(api: Arc<dyn AppointmentApi>) -> Self {
        Self {
            handle: RwLock::new(Some(AppointmentsHandle::new(api))),
        }
    }

    /// Get the handle if it exists
    pub async fn get_handle(&self) -> Option<AppointmentsHandle> {
        let handle_lock = self.handle.read().await;
        handle_lock.clone()
    }
}

#[async_trait]
impl super::Component for Appointments {
    fn name(&self) -> &'static str {
        "appointments"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> AppResult<()> {
        let mut handle_lock = self.handle.write().await;
        if handle_lock.is_some() {
            return Ok(());
        }

        let config = config.read().await;
        // An unusable token file only drops the Authorization header
        let token = match TokenStore::new(config.token_path.clone()).load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Ignoring unreadable access token: {}", e);
                None
            }
        };
        if token.is_none() {
            info!("No access token found, requests will be unauthenticated");
        }

        let client = AppointmentsClient::from_config(&config, token)?;
        *handle_lock = Some(AppointmentsHandle::new(Arc::new(client)));

        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        let handle_lock = self.handle.read().await;
        if let Some(handle) = &*handle_lock {
            handle.shutdown().await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
