//! Local host collection
//!
//! The same-host counterpart of the remote collector, backed by the
//! `sysinfo` crate instead of SSH. Produces the same [`SystemStats`] and
//! [`MonitoredProcess`] shapes so the filter engine and renderer are
//! shared with the remote path.

use std::path::Path;

use chrono::{Local, Utc};
use sysinfo::{ProcessesToUpdate, System};

use super::filter;
use super::metrics::{MonitoredProcess, SystemStats};
use crate::config::ProcessFilterSpec;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Collects metrics from the local host
pub struct LocalCollector {
    system: System,
}

impl LocalCollector {
    /// Creates a collector with a fully refreshed system snapshot
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: System::new_all(),
        }
    }

    /// Samples host-level CPU, memory, and root-filesystem disk usage.
    ///
    /// CPU usage needs two samples separated by sysinfo's minimum update
    /// interval, so this call blocks for roughly 200 ms.
    #[must_use]
    pub fn system_stats(&mut self) -> SystemStats {
        self.system.refresh_cpu_all();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        self.system.refresh_cpu_all();
        self.system.refresh_memory();

        let disks = sysinfo::Disks::new_with_refreshed_list();
        let (disk_used, disk_total) = disks
            .iter()
            .find(|d| d.mount_point() == Path::new("/"))
            .map_or((0.0, 0.0), |d| {
                let total = d.total_space() as f64;
                (total - d.available_space() as f64, total)
            });

        SystemStats {
            timestamp: Utc::now(),
            cpu_percent: f64::from(self.system.global_cpu_usage()),
            mem_used_mb: self.system.used_memory() as f64 / BYTES_PER_MB,
            mem_total_mb: self.system.total_memory() as f64 / BYTES_PER_MB,
            disk_used_gb: disk_used / BYTES_PER_GB,
            disk_total_gb: disk_total / BYTES_PER_GB,
        }
    }

    /// Lists local processes matching the filter spec.
    ///
    /// An empty spec yields an empty list (fail-closed), consistent with
    /// the remote path.
    #[must_use]
    pub fn filtered_processes(&mut self, filters: &ProcessFilterSpec) -> Vec<MonitoredProcess> {
        if filters.is_empty() {
            return Vec::new();
        }

        self.system.refresh_processes(ProcessesToUpdate::All, true);
        let users = sysinfo::Users::new_with_refreshed_list();
        let total_memory = self.system.total_memory() as f64;

        let mut matched: Vec<MonitoredProcess> = self
            .system
            .processes()
            .values()
            .filter_map(|process| {
                let user = process
                    .user_id()
                    .and_then(|uid| users.get_user_by_id(uid))
                    .map(|u| u.name().to_string())
                    .unwrap_or_default();

                let cmdline = process
                    .cmd()
                    .iter()
                    .map(|part| part.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(" ");

                let record = MonitoredProcess {
                    pid: process.pid().as_u32() as i32,
                    user,
                    group: String::new(),
                    name: process.name().to_string_lossy().into_owned(),
                    cmdline,
                    cpu_percent: f64::from(process.cpu_usage()),
                    mem_percent: if total_memory > 0.0 {
                        process.memory() as f64 / total_memory * 100.0
                    } else {
                        0.0
                    },
                    start_time: format_start_time(process.start_time()),
                    status: process.status().to_string(),
                };

                filter::matches(&record, filters).then_some(record)
            })
            .collect();

        matched.sort_by_key(|p| p.pid);
        matched
    }
}

impl Default for LocalCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a unix start time as local wall-clock `HH:MM:SS`
fn format_start_time(unix_secs: u64) -> String {
    chrono::DateTime::from_timestamp(unix_secs as i64, 0)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
