//! Configuration file management.
//!
//! Handles loading and saving the TOML configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# Slack Markdown Export Configuration
# Auto-generated - edit as needed

[export]
# Directory used when --output is not given (optional)
# output_dir = "/home/me/slack-transcripts"

# Write a single Combined_Output.md instead of one file per input
combine = false

[prompt]
# Replace existing output files without asking
assume_yes = false
"#;

/// Load configuration from file or return defaults.
///
/// # Errors
/// Returns error if file exists but cannot be read or parsed.
pub fn load_config() -> Result<AppConfig> {
    let config_path = config_file_path();

    if config_path.exists() {
        load_config_from_file(&config_path)
    } else {
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Save configuration to a specific file.
///
/// # Errors
/// Returns error if file cannot be written.
pub fn save_config_to_file(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| AppError::Config {
        message: format!("Failed to serialize config: {e}"),
    })?;

    fs::write(path, content).map_err(|e| {
        AppError::io(format!("Failed to write config file: {}", path.display()), e)
    })?;

    tracing::info!(path = %path.display(), "Configuration saved");

    Ok(())
}

/// Save configuration to the default location.
///
/// # Errors
/// Returns error if file cannot be written.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to_file(config, &config_file_path())
}

/// Create default configuration file if it doesn't exist.
///
/// Returns the config path and whether it was newly created.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists() -> Result<(PathBuf, bool)> {
    let config_path = config_file_path();
    let created = ensure_config_at(&config_path)?;
    Ok((config_path, created))
}

fn ensure_config_at(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %config_path.display(), "Created default configuration");

    Ok(true)
}

/// Get the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    AppConfig::config_file_path()
}
