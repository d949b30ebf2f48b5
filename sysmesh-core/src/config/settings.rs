//! Configuration schema types
//!
//! Deserialized from YAML by [`super::ConfigManager`]. Schema decoding is
//! deliberately permissive (serde defaults); security validation is a
//! separate, explicit step so the engine never trusts a value just
//! because it deserialized.

use serde::{Deserialize, Serialize};

use crate::validate::{
    self, ValidationResult, validate_hostname, validate_keyword, validate_port, validate_username,
};

/// Default polling interval in seconds
const fn default_interval_secs() -> u64 {
    10
}

/// Default SSH port
const fn default_port() -> u16 {
    22
}

const fn default_true() -> bool {
    true
}

/// Filtering criteria for processes.
///
/// A process matches when its name or command line contains any keyword
/// as a substring, or its user is in `users`, or its group is in
/// `groups`. An entirely empty spec matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFilterSpec {
    /// Substrings matched against process name and command line
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Exact-match user names
    #[serde(default)]
    pub users: Vec<String>,
    /// Exact-match group names
    #[serde(default)]
    pub groups: Vec<String>,
}

impl ProcessFilterSpec {
    /// Returns `true` if no criteria are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.users.is_empty() && self.groups.is_empty()
    }

    /// Validates every keyword, user, and group entry.
    ///
    /// Keywords must be free of shell metacharacters; users must be
    /// well-formed usernames; groups must be non-empty so an empty string
    /// can never act as a match-all.
    ///
    /// # Errors
    ///
    /// Returns the first [`validate::ValidationError`] encountered.
    pub fn validate(&self) -> ValidationResult {
        for keyword in &self.keywords {
            validate_keyword(keyword)?;
        }
        for user in &self.users {
            validate_username(user)?;
        }
        for group in &self.groups {
            if group.is_empty() {
                return Err(validate::ValidationError::EmptyGroup);
            }
        }
        Ok(())
    }
}

/// One remote host monitored over SSH.
///
/// Constructed once from configuration and immutable afterwards. Every
/// field is re-validated by the engine before it reaches the command
/// builder or the SSH executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTarget {
    /// Hostname or IPv4 address
    pub host: String,
    /// SSH username, also the `ps -u` argument
    pub user: String,
    /// SSH port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path to the SSH private key (`~` and env references are expanded
    /// at execution time)
    pub ssh_key: String,
    /// Optional jump host for `-J`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_jump: Option<String>,
    /// Per-target process filters
    #[serde(default)]
    pub process_filters: ProcessFilterSpec,
}

impl RemoteTarget {
    /// Validates every security-sensitive field of the target.
    ///
    /// # Errors
    ///
    /// Returns the first [`validate::ValidationError`] encountered.
    pub fn validate(&self) -> ValidationResult {
        validate_hostname(&self.host)?;
        validate_username(&self.user)?;
        validate_port(self.port)?;
        validate::validate_file_path(&self.ssh_key)?;
        if let Some(jump) = self.proxy_jump.as_deref()
            && !jump.is_empty()
        {
            validate_hostname(jump)?;
        }
        self.process_filters.validate()
    }
}

/// Local (same-host) monitoring section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalMonitorConfig {
    /// Whether local collection runs at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Filters applied to local processes
    #[serde(default)]
    pub process_filters: ProcessFilterSpec,
}

impl Default for LocalMonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            process_filters: ProcessFilterSpec::default(),
        }
    }
}

/// The `monitor:` section — one local block plus any number of remote targets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorTargets {
    /// Local monitoring
    #[serde(default)]
    pub local: LocalMonitorConfig,
    /// Remote targets collected over SSH
    #[serde(default)]
    pub remote: Vec<RemoteTarget>,
}

/// Root configuration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Polling interval in seconds (1 second to 24 hours)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Monitoring targets
    #[serde(default)]
    pub monitor: MonitorTargets,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            monitor: MonitorTargets::default(),
        }
    }
}

impl MonitorConfig {
    /// Lower bound for the polling interval (1 second)
    pub const MIN_INTERVAL_SECS: u64 = 1;
    /// Upper bound for the polling interval (24 hours)
    pub const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

    /// Returns `true` if the interval is inside the accepted range
    #[must_use]
    pub const fn interval_in_range(&self) -> bool {
        self.interval_secs >= Self::MIN_INTERVAL_SECS
            && self.interval_secs <= Self::MAX_INTERVAL_SECS
    }
}
