//! Slack Markdown Export - Convert Slack JSON message exports to Markdown.
//!
//! Reads the per-channel, per-day JSON files of a Slack workspace export and
//! writes readable Markdown transcripts, one per input or combined into one.
//!
//!   slack-md-export export general/ -o transcripts       # One .md per day file
//!   slack-md-export export a.json b.json -o out --combine
//!   slack-md-export preview general/2023-09-17.json      # Print to stdout
//!   slack-md-export inspect general/                     # Per-file record counts

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{format_inputs_table, format_totals, read_records, render_markdown, InputStats};
use cli::{Cli, Commands, ConfigAction, InputArgs};
use domain::{base_name, AppConfig, AppError};
use infrastructure::{
    collect_inputs, config_file_path, ensure_config_exists, load_config, read_path_list,
    save_config, OverwritePolicy, TerminalHost,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<ExitCode> {
    match cli.command {
        Commands::Export {
            inputs,
            output,
            combine,
            yes,
            no_clobber,
        } => cmd_export(&inputs, output, combine, yes, no_clobber),
        Commands::Preview { input } => {
            cmd_preview(&input)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Inspect { inputs } => {
            cmd_inspect(&inputs)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { action } => {
            cmd_config(action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Export command.
///
/// The export reports its own outcome through the terminal host, so only the
/// exit status is returned here.
fn cmd_export(
    args: &InputArgs,
    output: Option<String>,
    combine: bool,
    yes: bool,
    no_clobber: bool,
) -> domain::Result<ExitCode> {
    let config = load_config()?;
    let inputs = gather_inputs(args)?;

    let output_dir = output
        .or_else(|| {
            config
                .export
                .output_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
        })
        .unwrap_or_default();
    let combine = combine || config.export.combine;

    let policy = if no_clobber {
        OverwritePolicy::Never
    } else if yes || config.prompt.assume_yes {
        OverwritePolicy::Always
    } else {
        OverwritePolicy::Ask
    };

    tracing::info!(
        inputs = inputs.len(),
        output_dir = %output_dir,
        combine,
        "Starting export"
    );

    let mut host = TerminalHost::stdio(policy);
    match application::export(&mut host, &inputs, &output_dir, combine) {
        Ok(summary) => {
            for path in &summary.skipped {
                tracing::info!("Skipped {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// Print the Markdown for a single export file.
fn cmd_preview(input: &std::path::Path) -> domain::Result<()> {
    let records = read_records(input)?;
    print!("{}", render_markdown(&base_name(input), &records));
    Ok(())
}

/// Show per-input rendering statistics.
fn cmd_inspect(args: &InputArgs) -> domain::Result<()> {
    let inputs = gather_inputs(args)?;
    let inputs: Vec<&str> = inputs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    if inputs.is_empty() {
        return Err(AppError::NoInputFiles);
    }

    let mut stats = Vec::with_capacity(inputs.len());
    for input in inputs {
        let path = std::path::Path::new(input);
        let records = read_records(path)?;
        stats.push(InputStats::from_records(base_name(path), &records));
    }

    println!("{}", format_inputs_table(&stats));
    println!();
    println!("{}", format_totals(&stats));

    Ok(())
}

/// Configuration management command.
fn cmd_config(action: ConfigAction) -> domain::Result<()> {
    match action {
        ConfigAction::Init => {
            let (path, created) = ensure_config_exists()?;
            if created {
                println!("{} Created {}", "✓".green().bold(), path.display());
            } else {
                println!("Configuration already exists at {}", path.display());
            }
        }
        ConfigAction::Path => {
            println!("{}", config_file_path().display());
        }
        ConfigAction::Show => {
            let config = load_config()?;
            let content = toml::to_string_pretty(&config).map_err(|e| AppError::Config {
                message: format!("Failed to serialize config: {e}"),
            })?;
            print!("{content}");
        }
        ConfigAction::Set {
            output_dir,
            combine,
            assume_yes,
        } => {
            let mut config: AppConfig = load_config()?;
            if let Some(dir) = output_dir {
                config.export.output_dir = Some(dir);
            }
            if let Some(combine) = combine {
                config.export.combine = combine;
            }
            if let Some(assume_yes) = assume_yes {
                config.prompt.assume_yes = assume_yes;
            }
            save_config(&config)?;
            println!("{} Saved {}", "✓".green().bold(), config_file_path().display());
        }
    }

    Ok(())
}

/// Positional inputs followed by `--list` entries, with directories expanded.
fn gather_inputs(args: &InputArgs) -> domain::Result<Vec<String>> {
    let mut entries = args.inputs.clone();
    if let Some(ref list) = args.list {
        entries.extend(read_path_list(list)?);
    }
    collect_inputs(&entries)
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
