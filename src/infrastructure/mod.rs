//! Infrastructure layer - external adapters (filesystem, terminal).
//!
//! This layer handles configuration files, input discovery and user prompts.

pub mod config;
pub mod inputs;
pub mod terminal_host;

pub use config::{config_file_path, ensure_config_exists, load_config, save_config};
pub use inputs::{collect_inputs, read_path_list};
pub use terminal_host::{OverwritePolicy, TerminalHost};
