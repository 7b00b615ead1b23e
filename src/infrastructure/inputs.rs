//! Input path collection.
//!
//! Turns command-line arguments and list files into the ordered path list an
//! export works on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Result};

const JSON_EXTENSION: &str = "json";

/// Reads a newline-separated list of paths.
///
/// Lines are trimmed and blank lines dropped.
///
/// # Errors
/// Returns error if the file cannot be read.
pub fn read_path_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read path list {}", path.display()), e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Expands directories to the `*.json` files directly inside them.
///
/// Files are kept as given, in order. Each directory is replaced by its JSON
/// files sorted by name, which for a Slack channel folder is date order.
///
/// # Errors
/// Returns error if a directory cannot be listed.
pub fn collect_inputs(entries: &[String]) -> Result<Vec<String>> {
    let mut inputs = Vec::with_capacity(entries.len());

    for entry in entries {
        let path = Path::new(entry.trim());
        if entry.trim().is_empty() || !path.is_dir() {
            inputs.push(entry.clone());
            continue;
        }

        let mut files = json_files_in(path)?;
        if files.is_empty() {
            tracing::warn!("No JSON files in {}", path.display());
        }
        files.sort();
        tracing::debug!("Expanded {} to {} files", path.display(), files.len());
        inputs.extend(files.iter().map(|f| f.to_string_lossy().into_owned()));
    }

    Ok(inputs)
}

fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::io(format!("Failed to read directory {}", dir.display()), e))?;

    Ok(entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(JSON_EXTENSION))
        })
        .collect())
}
