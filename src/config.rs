//! Engine configuration module
//!
//! Defaults tuned for the meetings-management screen; every knob can be
//! overridden through `MEETINGFLOW_*` environment variables.

use crate::error::{AppError, AppResult};
use log::{info, warn};
use std::env;
use std::time::Duration;
use url::Url;

/// How long input must stay quiet before a deferred remote fetch fires.
const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Upper bound on concurrent per-template booking fetches.
const DEFAULT_FEED_FAN_OUT: usize = 5;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the remote record source, with trailing slash.
    pub api_base: String,
    /// Bearer token supplied by the session layer; renewal is not our job.
    pub auth_token: Option<String>,
    /// Server page size for the template list.
    pub page_size: u32,
    /// Quiescence window for search input and scroll-trigger coalescing.
    pub debounce: Duration,
    /// Cap on parents aggregated per feed pass.
    pub feed_fan_out: usize,
    /// Interval of the background records-changed refresh loop.
    pub refresh_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.meetingflow.app/v1/".to_string(),
            auth_token: None,
            page_size: 10,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            feed_fan_out: DEFAULT_FEED_FAN_OUT,
            refresh_interval: Duration::from_secs(300),
        }
    }
}

impl EngineConfig {
    /// Build a config from the environment, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base = env::var("MEETINGFLOW_API_BASE").unwrap_or(defaults.api_base);
        let auth_token = env::var("MEETINGFLOW_AUTH_TOKEN").ok();

        let page_size = parse_env("MEETINGFLOW_PAGE_SIZE", defaults.page_size);
        let debounce_ms = parse_env("MEETINGFLOW_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);
        let refresh_secs = parse_env(
            "MEETINGFLOW_REFRESH_SECS",
            defaults.refresh_interval.as_secs(),
        );

        Self {
            api_base,
            auth_token,
            page_size,
            debounce: Duration::from_millis(debounce_ms),
            feed_fan_out: defaults.feed_fan_out,
            refresh_interval: Duration::from_secs(refresh_secs),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_api_base(&self.api_base)?;
        if self.page_size == 0 {
            return Err(AppError::config("page size must be at least 1"));
        }
        if self.feed_fan_out == 0 {
            return Err(AppError::config("feed fan-out must be at least 1"));
        }
        info!("Engine configuration validated ({})", self.api_base);
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable value for {}: {}", key, raw);
            fallback
        }),
        Err(_) => fallback,
    }
}

/// Validates the remote API base URL before the engine is allowed to start.
pub fn validate_api_base(api_base: &str) -> AppResult<()> {
    if api_base.trim().is_empty() {
        return Err(AppError::config(
            "API base URL cannot be empty. Set MEETINGFLOW_API_BASE to the record source root.",
        ));
    }

    let parsed = Url::parse(api_base)
        .map_err(|e| AppError::config(format!("Invalid API base URL '{}': {}", api_base, e)))?;

    match parsed.scheme() {
        "https" => {}
        "http" => {
            // Tolerated for local development against a stub server.
            warn!("API base URL uses plain HTTP: {}", api_base);
        }
        other => {
            return Err(AppError::config(format!(
                "API base URL must use http or https, got '{}://'",
                other
            )));
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::config(format!("API base URL '{}' has no host", api_base)))?;
    if host.is_empty() {
        return Err(AppError::config("API base URL host cannot be empty"));
    }

    Ok(())
}
