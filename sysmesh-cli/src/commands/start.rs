//! Periodic monitoring loop command.

use std::path::Path;
use std::time::Duration;

use sysmesh_core::config::MonitorConfig;
use sysmesh_core::monitoring::{
    DEFAULT_CONCURRENCY, LocalCollector, OpenSshExecutor, RemoteCollector,
};

use super::OutputOptions;
use crate::error::CliError;
use crate::format;
use crate::util::load_config;

/// Start command handler: collect on every tick until interrupted.
pub fn cmd_start(
    config_path: Option<&Path>,
    output: OutputOptions,
    interval_override: Option<u64>,
    once: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let interval_secs = interval_override.unwrap_or(config.interval_secs).max(1);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Runtime(format!("Failed to create async runtime: {e}")))?;

    runtime.block_on(run_loop(&config, interval_secs, output, once))
}

async fn run_loop(
    config: &MonitorConfig,
    interval_secs: u64,
    output: OutputOptions,
    once: bool,
) -> Result<(), CliError> {
    let collector = RemoteCollector::new(OpenSshExecutor::new());
    let mut local = config
        .monitor
        .local
        .enabled
        .then(LocalCollector::new);

    if !output.quiet {
        println!("Starting sysmesh monitor: every {interval_secs}s");
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                if !output.quiet {
                    println!("Exiting system monitor.");
                }
                break;
            }
            _ = ticker.tick() => {
                run_cycle(config, &collector, local.as_mut(), output).await;
                if once {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// One collection cycle: local first, then every remote target.
///
/// Per-target failures are reported and skipped; they never abort the
/// cycle or the loop.
async fn run_cycle(
    config: &MonitorConfig,
    collector: &RemoteCollector<OpenSshExecutor>,
    local: Option<&mut LocalCollector>,
    output: OutputOptions,
) {
    if let Some(local) = local {
        let stats = local.system_stats();
        let processes = local.filtered_processes(&config.monitor.local.process_filters);
        if !output.quiet {
            format::print_system_stats("local", &stats, output.color);
            format::print_host_processes("local", stats.timestamp, &processes, output.color);
        }
    }

    for (host, result) in collector
        .collect_all(&config.monitor.remote, DEFAULT_CONCURRENCY)
        .await
    {
        match result {
            Ok(metrics) => {
                if !output.quiet {
                    format::print_remote_metrics(&metrics, output.color);
                }
            }
            Err(err) => {
                tracing::warn!(host = %host, error = %err, "remote collection failed");
                eprintln!("Remote {host} error: {err}");
            }
        }
    }
}
