//! Process and system-metrics collection
//!
//! The collection engine: command construction, SSH execution, output
//! decoding, filtering, and per-target orchestration for remote hosts,
//! plus the sysinfo-backed local counterpart. This module is UI-free —
//! rendering lives with the CLI.

pub mod collector;
pub mod command;
pub mod filter;
pub mod local;
mod metrics;
pub mod parser;
pub mod ssh_exec;

pub use collector::{DEFAULT_CONCURRENCY, RemoteCollector};
pub use command::{SYSTEM_STATS_COMMAND, build_ps_command, system_stats_command};
pub use local::LocalCollector;
pub use metrics::{MonitoredProcess, RemoteMetrics, SystemStats};
pub use parser::{OutputParser, ParseError};
pub use ssh_exec::{
    CommandExecutor, DEFAULT_EXEC_TIMEOUT_SECS, OpenSshExecutor, TransportError, validate_command,
};
