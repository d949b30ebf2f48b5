//! Command handler modules for the CLI.

mod check;
mod completions;
mod start;
mod validate;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Rendering and verbosity options shared by all handlers
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether ANSI colors are emitted
    pub color: bool,
    /// Whether non-error output is suppressed
    pub quiet: bool,
}

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(
    config_path: Option<&Path>,
    output: OutputOptions,
    command: Commands,
) -> Result<(), CliError> {
    match command {
        Commands::Start { interval, once } => start::cmd_start(config_path, output, interval, once),
        Commands::Check { target, timeout } => {
            check::cmd_check(config_path, output, &target, timeout)
        }
        Commands::Validate => validate::cmd_validate(config_path, output),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
