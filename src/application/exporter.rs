//! Export orchestration.
//!
//! Resolves an export job, asks the host before replacing existing files and
//! drives the converter over every input. The host is whatever front end
//! collects paths and answers prompts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::{
    AppError, ExportJob, ExportSummary, ExportTarget, Result, COMBINED_BASE_NAME, COMBINED_HEADER,
};

use super::converter::write_fragments;
use super::parser::read_records;

/// Severity of a message reported back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The export finished.
    Info,
    /// Nothing was done because a selection is missing.
    Warning,
    /// The export failed part way.
    Error,
}

/// Answer to an overwrite prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    /// Replace the existing file.
    Proceed,
    /// Keep the existing file.
    Cancel,
}

/// Front end that answers prompts and displays results.
pub trait ExportHost {
    /// Asked when an output named `name` (without extension) already exists.
    fn confirm_overwrite(&mut self, name: &str) -> OverwriteDecision;

    /// Show a message to the user.
    fn notify(&mut self, kind: NoticeKind, message: &str);
}

/// Runs a complete export and reports the outcome to `host`.
///
/// Selection problems are reported as warnings, failures as errors, and a
/// finished export as info. A declined combined export reports nothing.
///
/// # Errors
/// Returns the same error that was reported to the host.
pub fn export<H: ExportHost>(
    host: &mut H,
    input_paths: &[String],
    output_dir: &str,
    combine: bool,
) -> Result<ExportSummary> {
    let result = resolve_job(input_paths, output_dir, combine).and_then(|job| run_job(&job, host));

    match result {
        Ok(summary) => {
            if !summary.cancelled {
                host.notify(
                    NoticeKind::Info,
                    &format!(
                        "Messages exported successfully ({} file(s) written)",
                        summary.written.len()
                    ),
                );
            }
            Ok(summary)
        }
        Err(e) => {
            let kind = if e.is_user_input() {
                NoticeKind::Warning
            } else {
                NoticeKind::Error
            };
            host.notify(kind, &e.to_string());
            Err(e)
        }
    }
}

/// Builds the job for a set of selections.
///
/// Blank input entries are dropped and the rest are trimmed.
///
/// # Errors
/// Returns `NoInputFiles` or `NoOutputDir` when a selection is missing.
pub fn resolve_job(input_paths: &[String], output_dir: &str, combine: bool) -> Result<ExportJob> {
    let inputs: Vec<&str> = input_paths
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    if inputs.is_empty() {
        return Err(AppError::NoInputFiles);
    }

    if output_dir.is_empty() {
        return Err(AppError::NoOutputDir);
    }

    let output_dir = PathBuf::from(output_dir);
    let targets = inputs
        .into_iter()
        .map(|input| ExportTarget::new(input, &output_dir))
        .collect();

    Ok(ExportJob {
        output_dir,
        combine,
        targets,
    })
}

/// Executes a resolved job without reporting the outcome.
///
/// # Errors
/// Returns the first read, parse or write failure. Files finished before
/// the failure are left in place.
pub fn run_job<H: ExportHost>(job: &ExportJob, host: &mut H) -> Result<ExportSummary> {
    if job.combine {
        export_combined(job, host)
    } else {
        export_per_file(job, host)
    }
}

fn export_combined<H: ExportHost>(job: &ExportJob, host: &mut H) -> Result<ExportSummary> {
    let output = job.combined_output();

    if output.exists() && host.confirm_overwrite(COMBINED_BASE_NAME) == OverwriteDecision::Cancel {
        tracing::warn!("Combined export cancelled, {} kept", output.display());
        return Ok(ExportSummary::cancelled());
    }

    let mut writer = create_output(&output)?;
    write_output(&mut writer, &output, COMBINED_HEADER)?;

    for target in &job.targets {
        write_output(&mut writer, &output, &format!("### {}\n", target.base_name))?;
        append_input(&mut writer, &output, &target.input)?;
    }

    finish_output(writer, &output)?;

    Ok(ExportSummary {
        written: vec![output],
        ..ExportSummary::default()
    })
}

fn export_per_file<H: ExportHost>(job: &ExportJob, host: &mut H) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();

    for target in &job.targets {
        if target.output.exists()
            && host.confirm_overwrite(&target.base_name) == OverwriteDecision::Cancel
        {
            tracing::warn!("Skipping {}, existing file kept", target.output.display());
            summary.skipped.push(target.output.clone());
            continue;
        }

        let mut writer = create_output(&target.output)?;
        write_output(
            &mut writer,
            &target.output,
            &format!("### {}\n", target.base_name),
        )?;
        append_input(&mut writer, &target.output, &target.input)?;
        finish_output(writer, &target.output)?;

        summary.written.push(target.output.clone());
    }

    Ok(summary)
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {}", path.display()), e))?;
    Ok(BufWriter::new(file))
}

fn write_output<W: Write>(writer: &mut W, path: &Path, text: &str) -> Result<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))
}

fn append_input<W: Write>(writer: &mut W, output: &Path, input: &Path) -> Result<()> {
    let records = read_records(input)?;
    let count = write_fragments(writer, &records)
        .map_err(|e| AppError::io(format!("Failed to write {}", output.display()), e))?;

    tracing::debug!(
        "{}: {} of {} records rendered",
        input.display(),
        count,
        records.len()
    );
    Ok(())
}

fn finish_output(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;
    tracing::info!(path = %path.display(), "Wrote transcript");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::tempdir;

    /// Host that replays scripted answers and records everything it is told.
    #[derive(Default)]
    struct ScriptedHost {
        answers: VecDeque<OverwriteDecision>,
        prompts: Vec<String>,
        notices: Vec<(NoticeKind, String)>,
    }

    impl ScriptedHost {
        fn answering(answers: &[OverwriteDecision]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl ExportHost for ScriptedHost {
        fn confirm_overwrite(&mut self, name: &str) -> OverwriteDecision {
            self.prompts.push(name.to_string());
            self.answers.pop_front().unwrap_or(OverwriteDecision::Cancel)
        }

        fn notify(&mut self, kind: NoticeKind, message: &str) {
            self.notices.push((kind, message.to_string()));
        }
    }

    const A_JSON: &str = r#"[
        {"type": "message", "subtype": "channel_join", "text": "<@U1> has joined the channel"},
        {"type": "message", "text": "hello"},
        {"type": "message", "text": "see file", "files": [
            {"name": "plan.pdf", "url_private_download": "https://files.slack.com/plan.pdf"},
            {"name": "extra.pdf", "url_private_download": "https://files.slack.com/extra.pdf"}
        ]},
        {"type": "bot_add", "text": "ignored"}
    ]"#;

    const B_JSON: &str = r#"[{"type": "message", "text": "bye"}]"#;

    fn write_inputs(dir: &Path) -> Vec<String> {
        let a = dir.join("a.json");
        let b = dir.join("b.json");
        fs::write(&a, A_JSON).unwrap();
        fs::write(&b, B_JSON).unwrap();
        vec![a.display().to_string(), b.display().to_string()]
    }

    fn out_dir(root: &Path) -> PathBuf {
        let out = root.join("out");
        fs::create_dir(&out).unwrap();
        out
    }

    #[test]
    fn test_per_file_export() {
        let dir = tempdir().unwrap();
        let inputs = write_inputs(dir.path());
        let out = out_dir(dir.path());
        let mut host = ScriptedHost::default();

        let summary = export(&mut host, &inputs, &out.display().to_string(), false).unwrap();

        assert_eq!(summary.written, vec![out.join("a.md"), out.join("b.md")]);
        assert_eq!(
            fs::read_to_string(out.join("a.md")).unwrap(),
            "### a\n\n> <@U1> has joined the channel\n\n> hello\n\n> 文件: [plan.pdf](https://files.slack.com/plan.pdf)\n"
        );
        assert_eq!(fs::read_to_string(out.join("b.md")).unwrap(), "### b\n\n> bye\n");
        assert!(host.prompts.is_empty());
        assert_eq!(host.notices.len(), 1);
        assert_eq!(host.notices[0].0, NoticeKind::Info);
    }

    #[test]
    fn test_combined_export() {
        let dir = tempdir().unwrap();
        let inputs = write_inputs(dir.path());
        let out = out_dir(dir.path());
        let mut host = ScriptedHost::default();

        let summary = export(&mut host, &inputs, &out.display().to_string(), true).unwrap();

        let combined = out.join("Combined_Output.md");
        assert_eq!(summary.written, vec![combined.clone()]);
        assert_eq!(
            fs::read_to_string(&combined).unwrap(),
            "## Slack Message Combined Output\n\n### a\n\n> <@U1> has joined the channel\n\n> hello\n\n> 文件: [plan.pdf](https://files.slack.com/plan.pdf)\n### b\n\n> bye\n"
        );
        assert!(!out.join("a.md").exists());
    }

    #[test]
    fn test_declined_combined_overwrite_writes_nothing() {
        let dir = tempdir().unwrap();
        let inputs = write_inputs(dir.path());
        let out = out_dir(dir.path());
        fs::write(out.join("Combined_Output.md"), "old").unwrap();
        let mut host = ScriptedHost::answering(&[OverwriteDecision::Cancel]);

        let summary = export(&mut host, &inputs, &out.display().to_string(), true).unwrap();

        assert!(summary.cancelled);
        assert_eq!(host.prompts, vec!["Combined_Output"]);
        assert!(host.notices.is_empty());
        assert_eq!(fs::read_to_string(out.join("Combined_Output.md")).unwrap(), "old");
    }

    #[test]
    fn test_accepted_combined_overwrite_replaces_file() {
        let dir = tempdir().unwrap();
        let inputs = write_inputs(dir.path());
        let out = out_dir(dir.path());
        fs::write(out.join("Combined_Output.md"), "old content that is longer").unwrap();
        let mut host = ScriptedHost::answering(&[OverwriteDecision::Proceed]);

        export(&mut host, &inputs, &out.display().to_string(), true).unwrap();

        let content = fs::read_to_string(out.join("Combined_Output.md")).unwrap();
        assert!(content.starts_with("## Slack Message Combined Output\n\n### a\n"));
        assert!(!content.contains("old"));
    }

    #[test]
    fn test_declined_per_file_overwrite_skips_only_that_file() {
        let dir = tempdir().unwrap();
        let inputs = write_inputs(dir.path());
        let out = out_dir(dir.path());
        fs::write(out.join("a.md"), "keep me").unwrap();
        let mut host = ScriptedHost::answering(&[OverwriteDecision::Cancel]);

        let summary = export(&mut host, &inputs, &out.display().to_string(), false).unwrap();

        assert_eq!(host.prompts, vec!["a"]);
        assert_eq!(summary.skipped, vec![out.join("a.md")]);
        assert_eq!(summary.written, vec![out.join("b.md")]);
        assert_eq!(fs::read_to_string(out.join("a.md")).unwrap(), "keep me");
        assert_eq!(fs::read_to_string(out.join("b.md")).unwrap(), "### b\n\n> bye\n");
        assert_eq!(host.notices[0].0, NoticeKind::Info);
    }

    #[test]
    fn test_malformed_input_aborts_remaining_files() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        let good = dir.path().join("good.json");
        fs::write(&bad, r#"{"type": "message"}"#).unwrap();
        fs::write(&good, B_JSON).unwrap();
        let out = out_dir(dir.path());
        let inputs = vec![bad.display().to_string(), good.display().to_string()];
        let mut host = ScriptedHost::default();

        let err = export(&mut host, &inputs, &out.display().to_string(), false).unwrap_err();

        assert!(matches!(err, AppError::JsonParse { .. }));
        assert!(!out.join("good.md").exists());
        assert_eq!(host.notices.len(), 1);
        assert_eq!(host.notices[0].0, NoticeKind::Error);
        assert!(host.notices[0].1.contains("bad.json"));
    }

    #[test]
    fn test_earlier_outputs_survive_a_later_failure() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, B_JSON).unwrap();
        let out = out_dir(dir.path());
        let inputs = vec![
            good.display().to_string(),
            dir.path().join("missing.json").display().to_string(),
        ];
        let mut host = ScriptedHost::default();

        assert!(export(&mut host, &inputs, &out.display().to_string(), false).is_err());
        assert_eq!(fs::read_to_string(out.join("good.md")).unwrap(), "### good\n\n> bye\n");
        assert_eq!(host.notices[0].0, NoticeKind::Error);
    }

    #[test]
    fn test_combined_malformed_input_aborts() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let bad = dir.path().join("bad.json");
        let b = dir.path().join("b.json");
        fs::write(&a, B_JSON).unwrap();
        fs::write(&bad, "[{\"type\": \"message\",").unwrap();
        fs::write(&b, r#"[{"type": "message", "text": "never appended"}]"#).unwrap();
        let out = out_dir(dir.path());
        let inputs = vec![
            a.display().to_string(),
            bad.display().to_string(),
            b.display().to_string(),
        ];
        let mut host = ScriptedHost::default();

        let err = export(&mut host, &inputs, &out.display().to_string(), true).unwrap_err();

        assert!(matches!(err, AppError::JsonParse { .. }));
        assert_eq!(host.notices.len(), 1);
        assert_eq!(host.notices[0].0, NoticeKind::Error);
        assert!(host.notices[0].1.contains("bad.json"));
        assert_eq!(
            fs::read_to_string(out.join("Combined_Output.md")).unwrap(),
            "## Slack Message Combined Output\n\n### a\n\n> bye\n### bad\n"
        );
    }

    #[test]
    fn test_record_without_type_aborts_export() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        fs::write(&a, r#"[{"text": "no type here"}, {"type": "message", "text": "after"}]"#)
            .unwrap();
        fs::write(&b, B_JSON).unwrap();
        let out = out_dir(dir.path());
        let inputs = vec![a.display().to_string(), b.display().to_string()];
        let mut host = ScriptedHost::default();

        let err = export(&mut host, &inputs, &out.display().to_string(), false).unwrap_err();

        assert!(matches!(err, AppError::InvalidData { .. }));
        assert_eq!(host.notices.len(), 1);
        assert_eq!(host.notices[0].0, NoticeKind::Error);
        assert!(host.notices[0].1.contains("missing type"));
        assert_eq!(fs::read_to_string(out.join("a.md")).unwrap(), "### a\n");
        assert!(!out.join("b.md").exists());
    }

    #[test]
    fn test_no_inputs_is_a_warning() {
        let dir = tempdir().unwrap();
        let mut host = ScriptedHost::default();
        let inputs = vec![String::new(), "   ".to_string()];

        let err = export(&mut host, &inputs, &dir.path().display().to_string(), false).unwrap_err();

        assert!(matches!(err, AppError::NoInputFiles));
        assert_eq!(host.notices[0].0, NoticeKind::Warning);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_no_output_dir_is_a_warning() {
        let mut host = ScriptedHost::default();
        let inputs = vec!["a.json".to_string()];

        let err = export(&mut host, &inputs, "", true).unwrap_err();

        assert!(matches!(err, AppError::NoOutputDir));
        assert_eq!(host.notices[0].0, NoticeKind::Warning);
    }

    #[test]
    fn test_whitespace_output_dir_is_used_as_given() {
        let inputs = vec!["a.json".to_string()];
        let job = resolve_job(&inputs, " ", false).unwrap();
        assert_eq!(job.output_dir, PathBuf::from(" "));
    }

    #[test]
    fn test_resolve_job_trims_entries() {
        let inputs = vec![
            "  /logs/general.json ".to_string(),
            String::new(),
            "/logs/random.json".to_string(),
        ];
        let job = resolve_job(&inputs, "/out", false).unwrap();

        assert_eq!(job.targets.len(), 2);
        assert_eq!(job.targets[0].input, PathBuf::from("/logs/general.json"));
        assert_eq!(job.targets[0].output, PathBuf::from("/out/general.md"));
        assert_eq!(job.targets[1].base_name, "random");
    }
}
