//! sysmesh CLI - local and remote process/metrics monitoring
//!
//! Provides commands for running the periodic monitoring loop, one-shot
//! collections, configuration validation, and shell completions.

mod cli;
mod commands;
mod error;
mod format;
mod util;

use clap::Parser;
use cli::Cli;
use commands::OutputOptions;
use sysmesh_core::tracing::{TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let level = match cli.verbose {
        0 => TracingLevel::Warn,
        1 => TracingLevel::Info,
        2 => TracingLevel::Debug,
        _ => TracingLevel::Trace,
    };
    if let Err(e) = init_tracing(&TracingConfig::new().with_level(level)) {
        eprintln!("Warning: {e}");
    }

    let output = OutputOptions {
        color: !cli.no_color,
        quiet: cli.quiet,
    };

    let result = commands::dispatch(config_path, output, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
