//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// sysmesh command-line interface for local and remote process monitoring
#[derive(Parser)]
#[command(name = "sysmesh")]
#[command(author, version, about = "Local and remote process/metrics monitor over SSH")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, env = "SYSMESH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start periodic monitoring
    #[command(about = "Start the periodic monitoring loop")]
    Start {
        /// Override the configured polling interval, in seconds
        #[arg(short, long)]
        interval: Option<u64>,

        /// Run a single collection cycle and exit
        #[arg(long)]
        once: bool,
    },

    /// Collect once from one target
    #[command(about = "Collect once from a named target, \"local\", or \"all\"")]
    Check {
        /// Target host from the config, "local", or "all"
        target: String,

        /// Overall timeout for each remote command, in seconds
        #[arg(short, long, default_value = "30")]
        timeout: u64,
    },

    /// Validate the configuration file
    #[command(about = "Load and validate the configuration file, then exit")]
    Validate,

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
