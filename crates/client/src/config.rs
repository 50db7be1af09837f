//! # Client Configuration Module
//!
//! Loads the settings the ERP client needs from environment variables,
//! providing defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `ERP_API_BASE_URL`: Root of the REST backend (default: "http://localhost:5000/api")
//! - `ERP_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `ERP_SESSION_FILE`: Where the session token is persisted (default: ".iut-erp-session.json")
//! - `ERP_EMAIL` / `ERP_PASSWORD`: Credentials used when no session is stored
//! - `ERP_TIMEZONE_OFFSET`: Campus UTC offset that slot times without an offset are read in (default: "+01:00")
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use eyre::{Result, WrapErr};
use tracing::Level;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_SESSION_FILE: &str = ".iut-erp-session.json";
/// Africa/Douala, which keeps UTC+01:00 all year.
pub const DEFAULT_TIMEZONE_OFFSET_SECONDS: i32 = 3600;

/// Configuration for the ERP REST client.
///
/// # Example
///
/// ```no_run
/// use iut_erp_client::config::ClientConfig;
///
/// fn example() -> eyre::Result<()> {
///     let config = ClientConfig::from_env()?;
///     println!("Talking to {}", config.api_base_url);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, without trailing slash
    pub api_base_url: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// File the session token and user are persisted to
    pub session_file: PathBuf,

    /// Login e-mail (optional)
    pub email: Option<String>,

    /// Login password (optional)
    pub password: Option<String>,

    /// Offset of the campus clock; slot times without an offset are read in it
    pub timezone: FixedOffset,

    /// Log level for the application
    pub log_level: Level,
}

impl ClientConfig {
    /// Configuration pointing at `api_base_url` with every other setting at its default.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(&api_base_url.into()),
            request_timeout: 30,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            email: None,
            password: None,
            timezone: default_timezone(),
            log_level: Level::INFO,
        }
    }

    /// Creates a new ClientConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if `ERP_REQUEST_TIMEOUT_SECONDS`
    /// is set but is not a number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("ERP_API_BASE_URL")
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let request_timeout = lookup("ERP_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .trim()
            .parse()
            .wrap_err("Invalid ERP_REQUEST_TIMEOUT_SECONDS value")?;

        let session_file = lookup("ERP_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        let email = lookup("ERP_EMAIL").filter(|value| !value.is_empty());
        let password = lookup("ERP_PASSWORD").filter(|value| !value.is_empty());

        let timezone = match lookup("ERP_TIMEZONE_OFFSET") {
            Some(raw) => raw
                .trim()
                .parse::<FixedOffset>()
                .wrap_err("Invalid ERP_TIMEZONE_OFFSET value")?,
            None => default_timezone(),
        };

        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            session_file,
            email,
            password,
            timezone,
            log_level,
        })
    }

    /// Login credentials, when both halves are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }
}

fn default_timezone() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_TIMEZONE_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
