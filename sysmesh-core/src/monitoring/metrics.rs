//! Data models for collected metrics
//!
//! All types are plain data, serializable for export and tests. They are
//! produced only by the output parser (remote path) or the local
//! collector — never assembled from raw strings without numeric checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One process that matched the configured filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredProcess {
    /// Process ID
    pub pid: i32,
    /// Owning user name
    pub user: String,
    /// Owning group name (empty when the source does not report one)
    #[serde(default)]
    pub group: String,
    /// Process name (for remote processes this equals the command line)
    pub name: String,
    /// Full command line
    pub cmdline: String,
    /// CPU usage percentage
    pub cpu_percent: f64,
    /// Memory usage (percent of total for remote `ps` output)
    pub mem_percent: f64,
    /// Human-readable start time as reported by the source
    pub start_time: String,
    /// Process state string (e.g. `Ss`, `R+`)
    pub status: String,
}

/// Aggregated host-level resource usage at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    /// When the sample was taken
    pub timestamp: DateTime<Utc>,
    /// CPU usage percentage (0.0–100.0)
    pub cpu_percent: f64,
    /// Used memory in MB
    pub mem_used_mb: f64,
    /// Total memory in MB
    pub mem_total_mb: f64,
    /// Used disk space on the root filesystem in GB
    pub disk_used_gb: f64,
    /// Total disk space on the root filesystem in GB
    pub disk_total_gb: f64,
}

impl SystemStats {
    /// Memory usage as a percentage (0.0–100.0), 0 when total is unknown
    #[must_use]
    pub fn mem_percent(&self) -> f64 {
        if self.mem_total_mb <= 0.0 {
            return 0.0;
        }
        (self.mem_used_mb / self.mem_total_mb) * 100.0
    }

    /// Disk usage as a percentage (0.0–100.0), 0 when total is unknown
    #[must_use]
    pub fn disk_percent(&self) -> f64 {
        if self.disk_total_gb <= 0.0 {
            return 0.0;
        }
        (self.disk_used_gb / self.disk_total_gb) * 100.0
    }
}

/// Everything collected from one remote host in one cycle.
///
/// Assembled exactly once per successful collection; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteMetrics {
    /// The target's configured host
    pub host: String,
    /// When the collection completed
    pub timestamp: DateTime<Utc>,
    /// Filtered processes, in the order the remote `ps` reported them
    pub processes: Vec<MonitoredProcess>,
    /// Host-level stats, when the probe succeeded
    pub system_stats: Option<SystemStats>,
}
