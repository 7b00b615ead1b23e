//! Application layer - use cases and orchestration.
//!
//! This layer contains the conversion rules and the export workflow.

pub mod converter;
pub mod exporter;
pub mod formatter;
pub mod parser;

pub use converter::render_markdown;
pub use exporter::{export, ExportHost, NoticeKind, OverwriteDecision};
pub use formatter::{format_inputs_table, format_totals, InputStats};
pub use parser::read_records;
