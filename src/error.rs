use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    #[diagnostic(code(yakssok::http))]
    Http(#[from] reqwest::Error),

    #[error("Appointments API returned HTTP {status}: {body}")]
    #[diagnostic(code(yakssok::api))]
    Api { status: u16, body: String },

    #[error("Environment error: {0}")]
    #[diagnostic(code(yakssok::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(yakssok::config))]
    Config(String),

    #[error("Token error: {0}")]
    #[diagnostic(code(yakssok::token))]
    Token(String),

    #[error("Appointments error: {0}")]
    #[diagnostic(code(yakssok::appointments))]
    Appointments(String),

    #[error("Invitation error: {0}")]
    #[diagnostic(code(yakssok::invited))]
    Invited(String),

    #[error(transparent)]
    #[diagnostic(code(yakssok::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(yakssok::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(yakssok::other))]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create token errors
pub fn token_error(message: &str) -> Error {
    Error::Token(message.to_string())
}

/// Helper to create appointments errors
pub fn appointments_error(message: &str) -> Error {
    Error::Appointments(message.to_string())
}

/// Helper to create invitation errors
pub fn invited_error(message: &str) -> Error {
    Error::Invited(message.to_string())
}
