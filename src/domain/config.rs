//! Configuration types.
//!
//! Every field has a default so a partial or missing config file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Defaults for the `export` command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory used when `--output` is not given.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Combine all inputs into one file unless overridden.
    #[serde(default)]
    pub combine: bool,
}

/// Overwrite prompt behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Answer yes to every overwrite prompt.
    #[serde(default)]
    pub assume_yes: bool,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Export defaults.
    #[serde(default)]
    pub export: ExportConfig,

    /// Prompt behaviour.
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl AppConfig {
    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".slack-md-export")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }
}
