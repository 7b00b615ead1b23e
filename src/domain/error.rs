//! Domain-level error types for slack-md-export.
//!
//! All errors are typed with `thiserror`. The `Display` text is what gets
//! reported to the user, so it carries enough context to locate the problem.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// The input list was empty after dropping blank entries.
    #[error("No files selected: choose at least one JSON message export")]
    NoInputFiles,

    /// No output directory was given.
    #[error("No directory selected: choose a valid output directory")]
    NoOutputDir,

    /// Input parsed as JSON but does not have the expected shape.
    #[error("Invalid data in {}: {message}", .path.display())]
    InvalidData { path: PathBuf, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error in {}: {source}", .path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Create a JSON parse error for the given input file.
    pub fn json_parse(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        Self::JsonParse {
            path: path.into(),
            source: err,
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: err,
        }
    }

    /// Whether this error is a missing-selection problem rather than a failure.
    ///
    /// These are reported as warnings and always happen before any file I/O.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(self, Self::NoInputFiles | Self::NoOutputDir)
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
