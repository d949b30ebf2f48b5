//! Terminal rendering of collection results
//!
//! Stateless formatting functions; color usage is an explicit argument,
//! never global state. All output goes to stdout.

use chrono::{DateTime, Local, Utc};
use sysmesh_core::monitoring::{MonitoredProcess, RemoteMetrics, SystemStats};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";

/// CPU coloring thresholds: >70% red, >30% yellow, otherwise green
fn cpu_color(cpu_percent: f64, color: bool) -> &'static str {
    if !color {
        return "";
    }
    if cpu_percent > 70.0 {
        RED
    } else if cpu_percent > 30.0 {
        YELLOW
    } else {
        GREEN
    }
}

fn paint(on: bool, code: &'static str) -> &'static str {
    if on { code } else { "" }
}

fn local_clock(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}

/// Prints one host's system stats as a single line:
/// `[HH:MM:SS] host CPU: x% | MEM: used/total MB | DISK: used/total GB`
pub fn print_system_stats(host: &str, stats: &SystemStats, color: bool) {
    let bold = paint(color, BOLD);
    let reset = paint(color, RESET);
    println!(
        "[{}] {bold}{host}{reset} CPU: {:.1}% | MEM: {:.0}/{:.0} MB | DISK: {:.1}/{:.1} GB",
        local_clock(stats.timestamp),
        stats.cpu_percent,
        stats.mem_used_mb,
        stats.mem_total_mb,
        stats.disk_used_gb,
        stats.disk_total_gb,
    );
}

/// Prints a host's matched processes as a tree under a title line
pub fn print_host_processes(
    title: &str,
    timestamp: DateTime<Utc>,
    processes: &[MonitoredProcess],
    color: bool,
) {
    let bold = paint(color, BOLD);
    let cyan = paint(color, CYAN);
    let blue = paint(color, BLUE);
    let reset = paint(color, RESET);

    println!(
        "{bold}{cyan}{title}{reset} [{}] {} process(es) matched",
        local_clock(timestamp),
        processes.len()
    );

    for (i, process) in processes.iter().enumerate() {
        let connector = if i == processes.len() - 1 {
            "└──"
        } else {
            "├──"
        };
        let cpu = cpu_color(process.cpu_percent, color);

        println!("{connector} PID {:<6}: {}", process.pid, process.cmdline);
        println!(
            "│   ├── {cpu}CPU:{reset} {:.1}%   MEM: {:.1}%",
            process.cpu_percent, process.mem_percent
        );
        println!(
            "│   └── Start: {}   Stat: {}   User: {blue}{}{reset}",
            process.start_time, process.status, process.user
        );
    }
    println!();
}

/// Prints a full remote collection result: stats line plus process tree
pub fn print_remote_metrics(metrics: &RemoteMetrics, color: bool) {
    if let Some(stats) = &metrics.system_stats {
        print_system_stats(&metrics.host, stats, color);
    }
    print_host_processes(&metrics.host, metrics.timestamp, &metrics.processes, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_color_thresholds() {
        assert_eq!(cpu_color(80.0, true), RED);
        assert_eq!(cpu_color(50.0, true), YELLOW);
        assert_eq!(cpu_color(10.0, true), GREEN);
        assert_eq!(cpu_color(80.0, false), "");
    }

    #[test]
    fn test_paint_disabled_is_empty() {
        assert_eq!(paint(false, BOLD), "");
        assert_eq!(paint(true, BOLD), BOLD);
    }
}
