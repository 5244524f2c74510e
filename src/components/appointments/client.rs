use super::models::{Appointment, NewAppointment};
use crate::config::Config;
use crate::error::{appointments_error, config_error, AppResult, Error};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Operations the app needs from the appointments backend
#[async_trait]
pub trait AppointmentApi: Send + Sync {
    /// Appointments visible to the current user
    async fn list_appointments(&self) -> AppResult<Vec<Appointment>>;

    /// Appointment behind an invite code
    async fn appointment_by_invite_code(&self, invite_code: &str) -> AppResult<Appointment>;

    /// Create an appointment with its candidate dates
    async fn create_appointment(&self, request: &NewAppointment) -> AppResult<Appointment>;
}

/// HTTP client for the appointments API
#[derive(Debug, Clone)]
pub struct AppointmentsClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl AppointmentsClient {
    /// Create a client. Without a token requests go out unauthenticated.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| config_error(&format!("Invalid API_BASE_URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(config_error(&format!(
                "API_BASE_URL '{}' cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config, token: Option<String>) -> AppResult<Self> {
        Self::new(
            &config.api_base_url,
            token,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build `<base>/<segments...>`; an empty last segment keeps the trailing slash
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| appointments_error("API base URL cannot have path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attach the bearer token if present, send, and turn non-2xx into `Error::Api`
    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .ok()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            warn!("Appointments API returned {}: {}", status, body);
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl AppointmentApi for AppointmentsClient {
    async fn list_appointments(&self) -> AppResult<Vec<Appointment>> {
        let url = self.endpoint(&["appointments", ""])?;
        debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        let appointments: Vec<Appointment> = response.json().await?;
        Ok(appointments)
    }

    async fn appointment_by_invite_code(&self, invite_code: &str) -> AppResult<Appointment> {
        let invite_code = invite_code.trim();
        if invite_code.is_empty() {
            return Err(appointments_error("Invite code is empty"));
        }

        let url = self.endpoint(&["appointments", invite_code])?;
        debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn create_appointment(&self, request: &NewAppointment) -> AppResult<Appointment> {
        if request.name.trim().is_empty() {
            return Err(appointments_error("Appointment name is empty"));
        }

        let url = self.endpoint(&["appointments", ""])?;
        debug!("POST {}", url);

        let response = self.send(self.client.post(url).json(request)).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client =
            AppointmentsClient::new("http://localhost:8000/api", None, Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.endpoint(&["appointments", ""]).unwrap().as_str(),
            "http://localhost:8000/api/appointments/"
        );

        let client =
            AppointmentsClient::new("http://localhost:8000/api/", None, Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.endpoint(&["appointments", "AB12CD34"]).unwrap().as_str(),
            "http://localhost:8000/api/appointments/AB12CD34"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = AppointmentsClient::new("not a url", None, Duration::from_secs(1));
        assert!(matches!(result, Err(Error::Config(_))));

        let result = AppointmentsClient::new("mailto:someone@example.com", None, Duration::from_secs(1));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
