//! Config defaults and the fully-resolved settings used at runtime.

use std::path::PathBuf;
use std::time::Duration;

use crate::schema::{ApiConfig, LoggingConfig, RetryConfig, TelegraphConfig};

pub const DEFAULT_API_URL: &str = "https://api.telegra.ph";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = concat!("telegraphcl/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const DEFAULT_BASE_DELAY_MS: u64 = 500;

pub const DEFAULT_BACKOFF_FACTOR: f64 = 1.5;

pub const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

pub const DEFAULT_MAX_ELAPSED_MS: u64 = 60_000;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Retry settings with every value filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub backoff_factor: f64,
    pub max_delay: Duration,
    pub max_elapsed: Duration,
}

/// Runtime settings with every value filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub api_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub retry: RetrySettings,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(config: &TelegraphConfig, config_dir: PathBuf) -> Self {
        let api = config.api.clone().unwrap_or_default();
        let retry = config.retry.clone().unwrap_or_default();
        let logging = config.logging.clone().unwrap_or_default();

        Self {
            config_dir,
            api_url: resolve_api_url(&api),
            timeout: Duration::from_secs(api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            user_agent: api
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            retry: resolve_retry(&retry),
            log_level: resolve_log_level(&logging),
            log_dir: logging.dir,
        }
    }
}

fn resolve_api_url(api: &ApiConfig) -> String {
    api.base_url
        .as_deref()
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// A zero attempt budget would never issue the request, so it is raised to one.
fn resolve_retry(retry: &RetryConfig) -> RetrySettings {
    RetrySettings {
        max_attempts: retry.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1),
        base_delay: Duration::from_millis(retry.base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS)),
        backoff_factor: retry
            .backoff_factor
            .filter(|f| f.is_finite() && *f >= 1.0)
            .unwrap_or(DEFAULT_BACKOFF_FACTOR),
        max_delay: Duration::from_millis(retry.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS)),
        max_elapsed: Duration::from_millis(
            retry.max_elapsed_ms.unwrap_or(DEFAULT_MAX_ELAPSED_MS),
        ),
    }
}

fn resolve_log_level(logging: &LoggingConfig) -> String {
    logging
        .level
        .clone()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}
