//! Domain layer - core types and errors.
//!
//! This layer contains pure domain models and error types
//! without any I/O.

pub mod config;
pub mod error;
pub mod models;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use models::{
    base_name, ExportJob, ExportSummary, ExportTarget, FileAttachment, MessageRecord,
    COMBINED_BASE_NAME, COMBINED_HEADER, MARKDOWN_EXTENSION,
};
