//! One-shot collection command.

use std::path::Path;
use std::time::Duration;

use sysmesh_core::monitoring::{
    DEFAULT_CONCURRENCY, LocalCollector, OpenSshExecutor, RemoteCollector,
};

use super::OutputOptions;
use crate::error::CliError;
use crate::format;
use crate::util::{find_target, load_config};

/// Check command handler: collect once from `local`, a named host, or
/// `all`, and render immediately.
pub fn cmd_check(
    config_path: Option<&Path>,
    output: OutputOptions,
    target_name: &str,
    timeout_secs: u64,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    if target_name.eq_ignore_ascii_case("local") {
        let mut local = LocalCollector::new();
        let stats = local.system_stats();
        let processes = local.filtered_processes(&config.monitor.local.process_filters);
        if !output.quiet {
            format::print_system_stats("local", &stats, output.color);
            format::print_host_processes("local", stats.timestamp, &processes, output.color);
        }
        return Ok(());
    }

    let executor = OpenSshExecutor::with_timeout(Duration::from_secs(timeout_secs.max(1)));
    let collector = RemoteCollector::new(executor);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Runtime(format!("Failed to create async runtime: {e}")))?;

    if target_name.eq_ignore_ascii_case("all") {
        let results = runtime.block_on(
            collector.collect_all(&config.monitor.remote, DEFAULT_CONCURRENCY),
        );
        let mut failures = Vec::new();
        for (host, result) in results {
            match result {
                Ok(metrics) => {
                    if !output.quiet {
                        format::print_remote_metrics(&metrics, output.color);
                    }
                }
                Err(err) => {
                    eprintln!("Remote {host} error: {err}");
                    failures.push(host);
                }
            }
        }
        if !failures.is_empty() {
            return Err(CliError::Collection(format!(
                "{} of {} targets failed: {}",
                failures.len(),
                config.monitor.remote.len(),
                failures.join(", ")
            )));
        }
        return Ok(());
    }

    let target = find_target(&config.monitor.remote, target_name)?;
    let metrics = runtime
        .block_on(collector.collect(target))
        .map_err(|e| CliError::Collection(format!("{}: {e}", target.host)))?;
    if !output.quiet {
        format::print_remote_metrics(&metrics, output.color);
    }
    Ok(())
}
