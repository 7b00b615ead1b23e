//! Terminal front end for exports.
//!
//! Prompts on the error stream and reads answers from standard input so the
//! transcript written to files or stdout is never mixed with questions.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::application::{ExportHost, NoticeKind, OverwriteDecision};

/// How existing output files are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Ask for every existing file.
    #[default]
    Ask,
    /// Replace without asking.
    Always,
    /// Keep every existing file.
    Never,
}

/// Export host backed by a reader for answers and a writer for messages.
pub struct TerminalHost<R, W> {
    input: R,
    output: W,
    policy: OverwritePolicy,
}

impl TerminalHost<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Host on the process's stdin and stderr.
    #[must_use]
    pub fn stdio(policy: OverwritePolicy) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr(), policy)
    }
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    /// Create a host over arbitrary streams.
    pub const fn new(input: R, output: W, policy: OverwritePolicy) -> Self {
        Self {
            input,
            output,
            policy,
        }
    }

    /// Consume the host, returning the message stream.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, name: &str) -> OverwriteDecision {
        let prompt = format!("A file named \"{name}\" already exists. Replace it? [y/N] ");
        if write!(self.output, "{}", prompt.yellow())
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return OverwriteDecision::Cancel;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => OverwriteDecision::Cancel,
            Ok(_) => parse_answer(&answer),
        }
    }
}

impl<R: BufRead, W: Write> ExportHost for TerminalHost<R, W> {
    fn confirm_overwrite(&mut self, name: &str) -> OverwriteDecision {
        match self.policy {
            OverwritePolicy::Always => OverwriteDecision::Proceed,
            OverwritePolicy::Never => {
                tracing::info!("Keeping existing {name}");
                OverwriteDecision::Cancel
            }
            OverwritePolicy::Ask => self.ask(name),
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: &str) {
        let line = match kind {
            NoticeKind::Info => format!("{} {}", "✓".green().bold(), message),
            NoticeKind::Warning => format!("{} {}", "!".yellow().bold(), message.yellow()),
            NoticeKind::Error => format!("{} {}", "✗ Error:".red().bold(), message),
        };
        // Nowhere left to report a failure to write the report itself.
        let _ = writeln!(self.output, "{line}");
    }
}

/// `y`/`yes` in any case proceeds; anything else keeps the file.
fn parse_answer(answer: &str) -> OverwriteDecision {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => OverwriteDecision::Proceed,
        _ => OverwriteDecision::Cancel,
    }
}
