//! Service connection settings
//!
//! Settings are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values, and CLI flags
//! are applied on top through the `with_*` builders.
//!
//! ## Variables
//! - `WORKFLOW_API_URL`: base URL of the prediction service
//! - `WORKFLOW_REQUEST_TIMEOUT_SECS`: per-request timeout
//! - `WORKFLOW_REFRESH_INTERVAL_SECS`: period of the background asset refresh

use std::time::Duration;

use url::Url;

use crate::error::{WorkflowError, WorkflowResult};

pub const API_URL_VAR: &str = "WORKFLOW_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "WORKFLOW_REQUEST_TIMEOUT_SECS";
pub const REFRESH_INTERVAL_VAR: &str = "WORKFLOW_REFRESH_INTERVAL_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Always ends with `/` so relative endpoint paths join under it
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
}

impl ServiceConfig {
    /// Settings for `api_base_url` with default timeouts
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
        }
    }

    /// Load settings from `.env` and the process environment
    pub fn from_env() -> WorkflowResult<Self> {
        // Missing .env is fine
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> WorkflowResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(normalize_base_url(&api_url)?);

        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            config.request_timeout = parse_seconds(REQUEST_TIMEOUT_VAR, &raw)?;
        }
        if let Some(raw) = lookup(REFRESH_INTERVAL_VAR) {
            config.refresh_interval = parse_seconds(REFRESH_INTERVAL_VAR, &raw)?;
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, raw: &str) -> WorkflowResult<Self> {
        self.api_base_url = normalize_base_url(raw)?;
        Ok(self)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

fn normalize_base_url(raw: &str) -> WorkflowResult<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| WorkflowError::config(format!("{API_URL_VAR}={trimmed}: {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(WorkflowError::config(format!(
            "{API_URL_VAR}={trimmed}: expected an http(s) base URL"
        )));
    }
    Ok(url)
}

fn parse_seconds(var: &str, raw: &str) -> WorkflowResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(WorkflowError::config(format!(
            "{var}={raw}: expected a positive number of seconds"
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}
