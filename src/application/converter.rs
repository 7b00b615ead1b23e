//! Record to Markdown conversion.
//!
//! Each record becomes at most one blockquote fragment. Records are never
//! reordered, merged or deduplicated.

use std::fmt;
use std::io::Write;

use crate::domain::{FileAttachment, MessageRecord};

/// One rendered Markdown line produced from a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// A shared file, linked by its download URL.
    File(&'a FileAttachment),
    /// A chat message, text passed through verbatim.
    Text(&'a str),
}

impl fmt::Display for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(file) => write!(
                f,
                "\n> 文件: [{}]({})\n",
                file.name, file.url_private_download
            ),
            Self::Text(text) => write!(f, "\n> {text}\n"),
        }
    }
}

/// Picks the fragment for a record, if any.
///
/// A file attachment wins over message text; records that are neither a
/// file share nor a `message` with text produce nothing.
#[must_use]
pub fn fragment(record: &MessageRecord) -> Option<Fragment<'_>> {
    if let Some(ref file) = record.attachment {
        return Some(Fragment::File(file));
    }

    match record.text {
        Some(ref text) if record.is_message() => Some(Fragment::Text(text)),
        _ => None,
    }
}

/// Renders records into fragments, in record order.
#[must_use]
pub fn render(records: &[MessageRecord]) -> Vec<Fragment<'_>> {
    records
        .iter()
        .filter_map(|record| {
            let rendered = fragment(record);
            if rendered.is_none() {
                tracing::trace!(kind = ?record.kind, "Record produces no fragment");
            }
            rendered
        })
        .collect()
}

/// Appends the fragments for `records` to `writer`.
///
/// Returns the number of fragments written.
///
/// # Errors
/// Returns error if writing fails.
pub fn write_fragments<W: Write>(
    writer: &mut W,
    records: &[MessageRecord],
) -> std::io::Result<usize> {
    let fragments = render(records);
    for fragment in &fragments {
        write!(writer, "{fragment}")?;
    }
    Ok(fragments.len())
}

/// Renders the per-file transcript for one input as a string.
#[must_use]
pub fn render_markdown(base_name: &str, records: &[MessageRecord]) -> String {
    let mut out = format!("### {base_name}\n");
    for fragment in render(records) {
        out.push_str(&fragment.to_string());
    }
    out
}
