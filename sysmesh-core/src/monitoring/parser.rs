//! Decoders for remote command output
//!
//! Two line-oriented text formats come back over SSH: the `ps` process
//! table and the one-line system-stats probe. The process table is
//! decoded with a skip-and-continue policy — a single malformed line is
//! dropped, never the whole parse. The stats probe is all-or-nothing: a
//! partial system-stats record is never returned.

use chrono::Utc;

use super::filter;
use super::metrics::{MonitoredProcess, SystemStats};
use crate::config::ProcessFilterSpec;

/// Minimum whitespace-separated fields in a `ps` line:
/// pid, user, %cpu, %mem, stat, the 5-field `lstart` timestamp, and at
/// least one command field.
const MIN_PS_FIELDS: usize = 11;

/// Number of numeric tokens the system-stats probe must produce
const STATS_FIELD_COUNT: usize = 5;

/// Errors from decoding the system-stats probe
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The probe produced fewer tokens than [`STATS_FIELD_COUNT`]
    #[error("system stats output has {0} fields, expected {STATS_FIELD_COUNT}")]
    TooFewStatsFields(usize),

    /// A probe token failed to parse as a float
    #[error("failed to parse {field} value {value:?}")]
    InvalidStatsField {
        /// Which of the five positional fields failed
        field: &'static str,
        /// The offending token
        value: String,
    },
}

/// Stateless decoders for remote text output
pub struct OutputParser;

impl OutputParser {
    /// Decodes `ps -o pid,user,%cpu,%mem,stat,lstart,args --no-headers`
    /// output, applying `filters` to each decoded record.
    ///
    /// Lines with too few fields or non-numeric pid/cpu/mem tokens are
    /// skipped. Decoding is idempotent: the same input always yields the
    /// same record sequence, in input order.
    #[must_use]
    pub fn parse_process_table(
        output: &str,
        filters: &ProcessFilterSpec,
    ) -> Vec<MonitoredProcess> {
        let mut processes = Vec::new();
        for line in output.trim().lines() {
            if line.trim().is_empty() {
                continue;
            }
            match Self::parse_process_line(line) {
                Some(process) => {
                    if filter::matches(&process, filters) {
                        processes.push(process);
                    }
                }
                None => {
                    tracing::debug!(line, "skipping unparseable process line");
                }
            }
        }
        processes
    }

    /// Decodes one `ps` line, or `None` if it cannot be fully decoded.
    ///
    /// Positional layout: `pid user %cpu %mem stat <5-field lstart> args...`.
    /// A numeric field that fails to parse drops the line — fields are
    /// never defaulted.
    fn parse_process_line(line: &str) -> Option<MonitoredProcess> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_PS_FIELDS {
            return None;
        }

        let pid: i32 = fields[0].parse().ok()?;
        let cpu_percent: f64 = fields[2].parse().ok()?;
        let mem_percent: f64 = fields[3].parse().ok()?;
        let start_time = fields[5..10].join(" ");
        let cmdline = fields[10..].join(" ");

        Some(MonitoredProcess {
            pid,
            user: fields[1].to_string(),
            // ps output carries no group column
            group: String::new(),
            name: cmdline.clone(),
            cmdline,
            cpu_percent,
            mem_percent,
            start_time,
            status: fields[4].to_string(),
        })
    }

    /// Decodes the system-stats probe output: exactly five
    /// whitespace-separated numeric tokens in the fixed order
    /// cpu%, mem-used-MB, mem-total-MB, disk-used-GB, disk-total-GB.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if fewer than five tokens are present or
    /// any token fails to parse — no partial record is ever produced.
    pub fn parse_system_stats(output: &str) -> Result<SystemStats, ParseError> {
        let fields: Vec<&str> = output.split_whitespace().collect();
        if fields.len() < STATS_FIELD_COUNT {
            return Err(ParseError::TooFewStatsFields(fields.len()));
        }

        let parse = |field: &'static str, value: &str| {
            value
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidStatsField {
                    field,
                    value: value.to_string(),
                })
        };

        Ok(SystemStats {
            timestamp: Utc::now(),
            cpu_percent: parse("cpu", fields[0])?,
            mem_used_mb: parse("memory used", fields[1])?,
            mem_total_mb: parse("memory total", fields[2])?,
            disk_used_gb: parse("disk used", fields[3])?,
            disk_total_gb: parse("disk total", fields[4])?,
        })
    }
}
