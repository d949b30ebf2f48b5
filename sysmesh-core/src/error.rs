//! Error taxonomy for the collection engine
//!
//! Four failure classes cross the engine boundary: validation failures
//! (unsafe configuration values), command rejections (the defense-in-depth
//! check in front of the SSH subprocess), transport failures (the `ssh`
//! subprocess itself), and parse failures (the system-stats probe).
//! Validation and rejection errors are returned before any subprocess is
//! spawned. Nothing here is fatal to the process; per-target handling is
//! the caller's choice.

use crate::monitoring::parser::ParseError;
use crate::monitoring::ssh_exec::TransportError;
use crate::validate::ValidationError;

/// Errors returned by the remote collection engine
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A configuration value failed validation; no subprocess was spawned
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A built command tripped the pre-execution safety check.
    ///
    /// Firing on a builder-produced command indicates a programming error;
    /// the check exists to stop callers that bypass the builder.
    #[error("command rejected by safety check: {0}")]
    CommandRejected(String),

    /// The `ssh` subprocess failed to spawn, exited non-zero, or timed out
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The system-stats probe output could not be decoded
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for engine operations
pub type MonitorResult<T> = Result<T, MonitorError>;
