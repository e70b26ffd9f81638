//! Environment variable overrides for config values.
//!
//! Environment settings take precedence over `config.yaml`.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::schema::{ApiConfig, LoggingConfig, RetryConfig, TelegraphConfig};

pub const ENV_CONFIG_DIR: &str = "TELEGRAPHCL_CONFIG_DIR";
pub const ENV_API_URL: &str = "TELEGRAPHCL_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "TELEGRAPHCL_TIMEOUT_SECS";
pub const ENV_MAX_ATTEMPTS: &str = "TELEGRAPHCL_MAX_ATTEMPTS";
pub const ENV_LOG: &str = "TELEGRAPHCL_LOG";
pub const ENV_LOG_DIR: &str = "TELEGRAPHCL_LOG_DIR";

fn lookup<'a>(env: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: TelegraphConfig) -> Result<TelegraphConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: TelegraphConfig,
    env: &HashMap<String, String>,
) -> Result<TelegraphConfig> {
    if let Some(url) = lookup(env, ENV_API_URL) {
        config.api.get_or_insert_with(ApiConfig::default).base_url = Some(url.to_string());
    }
    if let Some(raw) = lookup(env, ENV_TIMEOUT_SECS) {
        let secs = raw
            .parse::<u64>()
            .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"))?;
        config.api.get_or_insert_with(ApiConfig::default).timeout_secs = Some(secs);
    }
    if let Some(raw) = lookup(env, ENV_MAX_ATTEMPTS) {
        let attempts = raw
            .parse::<u32>()
            .with_context(|| format!("{ENV_MAX_ATTEMPTS} must be a positive integer, got '{raw}'"))?;
        config.retry.get_or_insert_with(RetryConfig::default).max_attempts = Some(attempts);
    }
    if let Some(level) = lookup(env, ENV_LOG) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }
    if let Some(dir) = lookup(env, ENV_LOG_DIR) {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(PathBuf::from(dir));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_env_leaves_config_untouched() {
        let config = apply_env_overrides_with(TelegraphConfig::default(), &HashMap::new()).unwrap();
        assert_eq!(config, TelegraphConfig::default());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let base = TelegraphConfig {
            api: Some(ApiConfig {
                base_url: Some("https://from-file".into()),
                timeout_secs: Some(5),
                user_agent: None,
            }),
            ..Default::default()
        };
        let config = apply_env_overrides_with(
            base,
            &env(&[(ENV_API_URL, "http://localhost:1234"), (ENV_MAX_ATTEMPTS, "7"), (ENV_LOG, "debug")]),
        )
        .unwrap();
        let api = config.api.unwrap();
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:1234"));
        assert_eq!(api.timeout_secs, Some(5));
        assert_eq!(config.retry.unwrap().max_attempts, Some(7));
        assert_eq!(config.logging.unwrap().level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config =
            apply_env_overrides_with(TelegraphConfig::default(), &env(&[(ENV_API_URL, "  ")])).unwrap();
        assert!(config.api.is_none());
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = apply_env_overrides_with(TelegraphConfig::default(), &env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }
}
