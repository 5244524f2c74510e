use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default location of the persisted access token
pub const DEFAULT_TOKEN_PATH: &str = ".yakssok/access_token";
/// Default time zone used to decide which calendar day "today" is
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";
/// Default UI locale
pub const DEFAULT_LOCALE: &str = "ko";
/// Default number of event titles rendered inside one calendar cell
pub const DEFAULT_MAX_EVENTS_PER_DAY: usize = 2;
/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Optional file overriding the display settings
pub const DISPLAY_CONFIG_PATH: &str = "config/yakssok.toml";

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the appointments API, e.g. `https://api.example.com`
    pub api_base_url: String,
    /// File holding the bearer token
    pub token_path: PathBuf,
    /// IANA time zone name
    pub timezone: String,
    /// Locale for user-facing strings
    pub locale: String,
    /// Cap on event titles per calendar cell
    pub max_events_per_day: usize,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Display settings that may be overridden from `config/yakssok.toml`
#[derive(Debug, Default, Deserialize)]
struct DisplayOverrides {
    max_events_per_day: Option<usize>,
    locale: Option<String>,
    timezone: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL").map_err(|_| env_error("API_BASE_URL"))?;

        let token_path = env::var("TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH));

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        let locale = env::var("YAKSSOK_LOCALE").unwrap_or_else(|_| String::from(DEFAULT_LOCALE));

        let max_events_per_day = match env::var("MAX_EVENTS_PER_DAY") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|_| env_error("Invalid MAX_EVENTS_PER_DAY format"))?,
            Err(_) => DEFAULT_MAX_EVENTS_PER_DAY,
        };

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid REQUEST_TIMEOUT_SECS format"))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let mut config = Config {
            api_base_url,
            token_path,
            timezone,
            locale,
            max_events_per_day,
            request_timeout_secs,
        };

        config.apply_display_file(Path::new(DISPLAY_CONFIG_PATH))?;
        config.tz()?;

        Ok(config)
    }

    /// Merge display overrides from a TOML file, if the file exists.
    /// A malformed file is skipped with a warning; an unreadable one is an error.
    pub fn apply_display_file(&mut self, path: &Path) -> AppResult<()> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(config_error(&format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let overrides: DisplayOverrides = match toml::from_str(&content) {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                return Ok(());
            }
        };

        if let Some(max) = overrides.max_events_per_day {
            self.max_events_per_day = max;
        }
        if let Some(locale) = overrides.locale {
            self.locale = locale;
        }
        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }

        Ok(())
    }

    /// Parsed time zone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| config_error(&format!("Invalid TIMEZONE '{}': {}", self.timezone, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_config() -> Config {
        Config {
            api_base_url: "http://localhost:8000".to_string(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            max_events_per_day: DEFAULT_MAX_EVENTS_PER_DAY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    #[test]
    fn test_tz_parses_default_zone() {
        let config = base_config();
        assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Seoul);
    }

    #[test]
    fn test_tz_rejects_unknown_zone() {
        let mut config = base_config();
        config.timezone = "Mars/Olympus".to_string();
        assert!(matches!(config.tz(), Err(crate::error::Error::Config(_))));
    }

    #[test]
    fn test_display_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_events_per_day = 3\nlocale = \"en\"").unwrap();

        let mut config = base_config();
        config.apply_display_file(file.path()).unwrap();

        assert_eq!(config.max_events_per_day, 3);
        assert_eq!(config.locale, "en");
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_missing_display_file_is_ignored() {
        let mut config = base_config();
        config
            .apply_display_file(Path::new("does/not/exist.toml"))
            .unwrap();
        assert_eq!(config.max_events_per_day, DEFAULT_MAX_EVENTS_PER_DAY);
    }

    #[test]
    fn test_malformed_display_file_is_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_events_per_day = \"many\"\nlocale = ").unwrap();

        let mut config = base_config();
        assert!(config.apply_display_file(file.path()).is_ok());
        assert_eq!(config.max_events_per_day, DEFAULT_MAX_EVENTS_PER_DAY);
        assert_eq!(config.locale, DEFAULT_LOCALE);
    }

    #[test]
    fn test_unreadable_display_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = base_config();
        let result = config.apply_display_file(dir.path());
        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }
}
