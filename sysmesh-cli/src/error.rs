//! CLI error types and exit codes.

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other non-collection errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Collection failure - a remote or local collection did not complete
    pub const COLLECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Named target not found in the configuration
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    /// One or more collections failed
    #[error("Collection failed: {0}")]
    Collection(String),

    /// Async runtime error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, runtime, IO)
    /// - 2: Collection failure (target unreachable or not found)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Collection(_) | Self::TargetNotFound(_) => exit_codes::COLLECTION_FAILURE,
            Self::Config(_) | Self::Runtime(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
