//! Summary formatting for the `inspect` command.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{MessageRecord, MARKDOWN_EXTENSION};

use super::converter::{fragment, Fragment};

/// Per-input counts of how records will be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputStats {
    /// Input file name without extension.
    pub base_name: String,
    /// Records in the export array.
    pub records: usize,
    /// Records rendered as message text.
    pub messages: usize,
    /// Records rendered as file links.
    pub files: usize,
    /// Records that produce nothing.
    pub skipped: usize,
}

impl InputStats {
    /// Classifies every record of one input.
    #[must_use]
    pub fn from_records(base_name: impl Into<String>, records: &[MessageRecord]) -> Self {
        let mut stats = Self {
            base_name: base_name.into(),
            records: records.len(),
            ..Self::default()
        };

        for record in records {
            match fragment(record) {
                Some(Fragment::Text(_)) => stats.messages += 1,
                Some(Fragment::File(_)) => stats.files += 1,
                None => stats.skipped += 1,
            }
        }

        stats
    }
}

/// Formats a table with one row per input.
pub fn format_inputs_table(inputs: &[InputStats]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Input", "Records", "Messages", "Files", "Skipped", "Target"]);

    for stats in inputs {
        table.add_row(vec![
            truncate(&stats.base_name, 32),
            stats.records.to_string(),
            stats.messages.to_string(),
            stats.files.to_string(),
            stats.skipped.to_string(),
            format!("{}.{MARKDOWN_EXTENSION}", truncate(&stats.base_name, 32)),
        ]);
    }

    table.to_string()
}

/// Formats totals across all inputs.
pub fn format_totals(inputs: &[InputStats]) -> String {
    let sum = |f: fn(&InputStats) -> usize| inputs.iter().map(f).sum::<usize>();

    format!(
        "{}\n  Inputs: {}\n  Records: {}\n  Messages: {}\n  Files: {}\n  Skipped: {}",
        "📊 Totals".bold(),
        inputs.len().to_string().cyan(),
        sum(|s| s.records).to_string().cyan(),
        sum(|s| s.messages).to_string().green(),
        sum(|s| s.files).to_string().blue(),
        sum(|s| s.skipped).to_string().yellow()
    )
}

/// Truncates a string to max characters with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
