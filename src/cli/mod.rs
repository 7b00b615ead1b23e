//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Slack Markdown Export - Convert Slack JSON message exports to Markdown.
#[derive(Parser, Debug)]
#[command(name = "slack-md-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input selection shared by commands that read exports.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// JSON export files, or directories of them.
    pub inputs: Vec<String>,

    /// File with one input path per line.
    #[arg(short, long)]
    pub list: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert exports to Markdown files.
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory (defaults to export.output_dir from the config).
        #[arg(short, long)]
        output: Option<String>,

        /// Write everything into a single Combined_Output.md.
        #[arg(short, long)]
        combine: bool,

        /// Replace existing files without asking.
        #[arg(short, long, conflicts_with = "no_clobber")]
        yes: bool,

        /// Never replace existing files.
        #[arg(short = 'n', long)]
        no_clobber: bool,
    },

    /// Print the Markdown for one export file to stdout.
    Preview {
        /// JSON export file.
        input: PathBuf,
    },

    /// Show how records in each input will be rendered.
    Inspect {
        #[command(flatten)]
        inputs: InputArgs,
    },

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create the default configuration file if missing.
    Init,
    /// Print the configuration file path.
    Path,
    /// Print the effective configuration.
    Show,
    /// Update configuration values.
    Set {
        /// Default output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Combine inputs by default.
        #[arg(long)]
        combine: Option<bool>,

        /// Replace existing files without asking.
        #[arg(long)]
        assume_yes: Option<bool>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from([
            "slack-md-export",
            "export",
            "a.json",
            "b.json",
            "-o",
            "out",
            "--combine",
        ]);
        match cli.command {
            Commands::Export {
                inputs,
                output,
                combine,
                yes,
                no_clobber,
            } => {
                assert_eq!(inputs.inputs, vec!["a.json", "b.json"]);
                assert_eq!(output.as_deref(), Some("out"));
                assert!(combine);
                assert!(!yes && !no_clobber);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_yes_conflicts_with_no_clobber() {
        let result = Cli::try_parse_from(["slack-md-export", "export", "a.json", "-y", "-n"]);
        assert!(result.is_err());
    }
}
