//! Client configuration from `.env` and the process environment.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, EXIT_LOCAL};
use crate::messages::Locale;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const APP_DIR: &str = "smartrecruit";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server root; endpoint paths are appended (`/api/...`).
    pub api_url: String,
    pub token_file: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub locale: Locale,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let base = app_dir();

        let api_url = var("SR_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(AppError::new(
                EXIT_LOCAL,
                format!("SR_API_URL must start with http:// or https:// (got: {api_url})."),
            ));
        }

        let poll_ms = parse_number(var("SR_POLL_INTERVAL_MS"), "SR_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        if poll_ms == 0 {
            return Err(AppError::new(EXIT_LOCAL, "SR_POLL_INTERVAL_MS must be positive."));
        }
        let timeout_secs = parse_number(var("SR_TIMEOUT_SECS"), "SR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::new(EXIT_LOCAL, "SR_TIMEOUT_SECS must be positive."));
        }

        let locale = match var("SR_LOCALE") {
            Some(raw) => raw.parse::<Locale>().map_err(|e| AppError::new(EXIT_LOCAL, e))?,
            None => Locale::default(),
        };

        Ok(Self {
            api_url,
            token_file: var("SR_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| base.join("token")),
            settings_file: var("SR_SETTINGS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| base.join("settings.json")),
            log_file: var("SR_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| base.join("sr.log")),
            poll_interval: Duration::from_millis(poll_ms),
            timeout: Duration::from_secs(timeout_secs),
            locale,
        })
    }
}

/// `<config_dir>/smartrecruit`, or `./.smartrecruit` when the platform has
/// no config directory.
fn app_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from(format!(".{APP_DIR}")),
    }
}

fn parse_number(raw: Option<String>, key: &str, default: u64) -> Result<u64, AppError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            AppError::new(
                EXIT_LOCAL,
                format!("{key} must be a non-negative integer (got: {raw})."),
            )
        }),
    }
}
