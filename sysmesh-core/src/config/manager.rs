//! Config file loading and validation

use std::path::{Path, PathBuf};

use crate::validate::ValidationError;

use super::settings::MonitorConfig;

/// Config file name under the sysmesh config directory
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Errors from loading or validating the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was attempted
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for the expected schema
    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A security-sensitive value failed validation
    #[error("config validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The polling interval is outside 1 second – 24 hours
    #[error("interval must be between 1 second and 24 hours, got {0}s")]
    InvalidInterval(u64),

    /// No platform config directory could be determined
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Loads and validates the YAML configuration file.
///
/// Holds only the resolved path; every [`load`](Self::load) re-reads the
/// file, so config edits take effect on the next load.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager pointing at the default config location
    /// (`$XDG_CONFIG_HOME/sysmesh/config.yaml` or the platform equivalent).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if the platform config
    /// directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self {
            config_path: dir.join("sysmesh").join(CONFIG_FILE_NAME),
        })
    }

    /// Creates a manager pointing at an explicit config file path
    #[must_use]
    pub fn with_config_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Returns the path this manager reads from
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads, deserializes, and validates the configuration.
    ///
    /// Validation covers the interval range and every security-sensitive
    /// field of every remote target and the local filter spec — values
    /// that deserialized cleanly are still untrusted until they pass.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for I/O failures, YAML schema mismatch,
    /// an out-of-range interval, or any field failing validation.
    pub fn load(&self) -> ConfigResult<MonitorConfig> {
        let text = std::fs::read_to_string(&self.config_path).map_err(|source| ConfigError::Io {
            path: self.config_path.display().to_string(),
            source,
        })?;
        let config: MonitorConfig = serde_yaml::from_str(&text)?;
        Self::validate(&config)?;
        tracing::debug!(
            path = %self.config_path.display(),
            remote_targets = config.monitor.remote.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Validates an already-deserialized configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an out-of-range interval or any
    /// target/filter field failing validation.
    pub fn validate(config: &MonitorConfig) -> ConfigResult<()> {
        if !config.interval_in_range() {
            return Err(ConfigError::InvalidInterval(config.interval_secs));
        }
        for target in &config.monitor.remote {
            target.validate()?;
        }
        config.monitor.local.process_filters.validate()?;
        Ok(())
    }
}
