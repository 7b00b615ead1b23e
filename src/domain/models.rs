//! Domain models for Slack message exports.
//!
//! These models represent the records read from a Slack JSON export and the
//! output files an export resolves to.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Base name of the single output file written in combine mode.
pub const COMBINED_BASE_NAME: &str = "Combined_Output";

/// Extension given to every output file.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Header written once at the top of the combined output file.
pub const COMBINED_HEADER: &str = "## Slack Message Combined Output\n\n";

/// Record `type` value that marks an ordinary chat message.
pub const MESSAGE_TYPE: &str = "message";

/// A file shared in a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileAttachment {
    /// Display name of the file.
    pub name: String,
    /// Authenticated download link.
    pub url_private_download: String,
}

/// One entry of a Slack export array.
///
/// Only the first attachment of a record is kept; Slack allows several but
/// the transcript links just one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRecord {
    /// Event type (`message`, `channel_join`, ...).
    pub kind: Option<String>,
    /// Message body, passed through verbatim.
    pub text: Option<String>,
    /// First file shared with this record, if any.
    pub attachment: Option<FileAttachment>,
}

impl MessageRecord {
    /// Build a plain chat message.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            kind: Some(MESSAGE_TYPE.to_string()),
            text: Some(text.into()),
            attachment: None,
        }
    }

    /// Whether the record is an ordinary chat message.
    #[must_use]
    pub fn is_message(&self) -> bool {
        self.kind.as_deref() == Some(MESSAGE_TYPE)
    }
}

/// One input file and the Markdown file it maps to in per-file mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    /// Path of the JSON export.
    pub input: PathBuf,
    /// Input file name without directory or extension.
    pub base_name: String,
    /// `{output_dir}/{base_name}.md`.
    pub output: PathBuf,
}

impl ExportTarget {
    /// Resolve the target for `input` inside `output_dir`.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output_dir: &Path) -> Self {
        let input = input.into();
        let base_name = base_name(&input);
        let output = output_dir.join(format!("{base_name}.{MARKDOWN_EXTENSION}"));
        Self {
            input,
            base_name,
            output,
        }
    }
}

/// All input/output resolutions for one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Directory that receives the Markdown files.
    pub output_dir: PathBuf,
    /// Write a single combined file instead of one file per input.
    pub combine: bool,
    /// Inputs in the order they were given.
    pub targets: Vec<ExportTarget>,
}

impl ExportJob {
    /// Path of the combined output file.
    #[must_use]
    pub fn combined_output(&self) -> PathBuf {
        self.output_dir
            .join(format!("{COMBINED_BASE_NAME}.{MARKDOWN_EXTENSION}"))
    }
}

/// What an export run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Output files fully written, in order.
    pub written: Vec<PathBuf>,
    /// Existing outputs the user chose to keep.
    pub skipped: Vec<PathBuf>,
    /// The combined export was declined and nothing was written.
    pub cancelled: bool,
}

impl ExportSummary {
    /// Summary of a combined export the user declined.
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Self::default()
        }
    }
}

/// File name without directory and without its last extension.
#[must_use]
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
