//! `telegraphcl-config` — configuration and token storage.
//!
//! Provides:
//! - Typed config schema read from `config.yaml`
//! - Environment variable overrides
//! - Default values and the resolved runtime `Settings`
//! - The access token store

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod token;

pub use defaults::{RetrySettings, Settings};
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config};
pub use schema::TelegraphConfig;
pub use token::{TokenError, TokenStore};

use anyhow::Result;
use std::path::Path;

/// Load the config file, apply environment overrides, and fill in defaults.
///
/// This is the main entry point for loading settings at runtime.
pub async fn load_settings(config_dir: &Path) -> Result<Settings> {
    let config = load_config(&config_file_path(config_dir)).await?;
    let config = apply_env_overrides(config)?;
    let settings = Settings::resolve(&config, config_dir.to_path_buf());
    tracing::debug!(
        api_url = %settings.api_url,
        max_attempts = settings.retry.max_attempts,
        "Resolved settings"
    );
    Ok(settings)
}
