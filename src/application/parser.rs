//! JSON parsing for Slack export files.
//!
//! Handles conversion from the raw export array to domain records.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{AppError, FileAttachment, MessageRecord, Result};

/// Raw record as stored in a Slack export file.
///
/// Fields other than these are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    files: Option<Vec<serde_json::Value>>,
}

/// Reads and parses one export file.
///
/// # Errors
/// Returns error if the file cannot be read or is not a JSON array of records.
pub fn read_records(path: &Path) -> Result<Vec<MessageRecord>> {
    let data = std::fs::read(path)
        .map_err(|e| AppError::io(format!("Failed to read {}", path.display()), e))?;
    parse_records(path, &data)
}

/// Parses the contents of an export file.
///
/// `path` is only used for error messages.
///
/// # Errors
/// Returns error if the top level is not an array, an element is not an
/// object, a record's first attachment lacks `name`/`url_private_download`,
/// or a record without a file has no `type`.
pub fn parse_records(path: &Path, data: &[u8]) -> Result<Vec<MessageRecord>> {
    let raw: Vec<RawRecord> =
        serde_json::from_slice(data).map_err(|e| AppError::json_parse(path, e))?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, r)| into_record(path, index, r))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Parsed {} records from {}", records.len(), path.display());
    Ok(records)
}

fn into_record(path: &Path, index: usize, raw: RawRecord) -> Result<MessageRecord> {
    // Later attachments are never looked at, so they are not validated either.
    let attachment = match raw.files.and_then(|files| files.into_iter().next()) {
        Some(first) => Some(
            serde_json::from_value::<FileAttachment>(first).map_err(|e| {
                AppError::InvalidData {
                    path: path.to_path_buf(),
                    message: format!("record {index}: bad file attachment: {e}"),
                }
            })?,
        ),
        None => None,
    };

    // Without a file the record is classified by its type, so it must have one.
    if attachment.is_none() && raw.kind.is_none() {
        return Err(AppError::InvalidData {
            path: path.to_path_buf(),
            message: format!("record {index}: missing type"),
        });
    }

    Ok(MessageRecord {
        kind: raw.kind,
        text: raw.text,
        attachment,
    })
}
