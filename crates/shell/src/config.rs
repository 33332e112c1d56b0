//! Environment configuration for the shell.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use stockdesk_api_client::DEFAULT_API_BASE_URL;
use stockdesk_core::constants::{DEFAULT_INSIGHTS_REFRESH_SECS, DEFAULT_QUOTE_REFRESH_SECS};
use stockdesk_core::errors::{Error, Result};

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL.
    pub api_base_url: String,
    /// Cadence of the quote refresh task.
    pub quote_refresh: Duration,
    /// Cadence of the portfolio-insights refresh task.
    pub insights_refresh: Duration,
    /// Optional timeout on outbound HTTP calls. When unset, a hung call
    /// leaves the requesting view in its loading state.
    pub http_timeout: Option<Duration>,
    /// Where the advisory session marker lives; in-memory when unset.
    pub session_marker_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            quote_refresh: Duration::from_secs(DEFAULT_QUOTE_REFRESH_SECS),
            insights_refresh: Duration::from_secs(DEFAULT_INSIGHTS_REFRESH_SECS),
            http_timeout: None,
            session_marker_path: None,
        }
    }
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first
    /// when present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            api_base_url: env::var("SD_API_BASE_URL").unwrap_or(defaults.api_base_url),
            quote_refresh: secs_from_env("SD_QUOTE_REFRESH_SECS", defaults.quote_refresh)?,
            insights_refresh: secs_from_env("SD_INSIGHTS_REFRESH_SECS", defaults.insights_refresh)?,
            http_timeout: optional_secs_from_env("SD_HTTP_TIMEOUT_SECS")?,
            session_marker_path: env::var("SD_SESSION_MARKER_PATH").ok().map(PathBuf::from),
        })
    }
}

fn secs_from_env(key: &str, default: Duration) -> Result<Duration> {
    match env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => parse_secs(key, &raw),
    }
}

fn optional_secs_from_env(key: &str) -> Result<Option<Duration>> {
    match env::var(key) {
        Err(_) => Ok(None),
        Ok(raw) => parse_secs(key, &raw).map(Some),
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| Error::InvalidConfigValue(format!("{}={}", key, raw)))
}
