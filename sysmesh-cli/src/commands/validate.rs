//! Configuration validation command.

use std::path::Path;

use super::OutputOptions;
use crate::error::CliError;
use crate::util::load_config;

/// Validate command handler: load the config, run full validation, and
/// report what was accepted.
pub fn cmd_validate(config_path: Option<&Path>, output: OutputOptions) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    if !output.quiet {
        println!(
            "Configuration OK: interval {}s, local monitoring {}, {} remote target(s)",
            config.interval_secs,
            if config.monitor.local.enabled {
                "enabled"
            } else {
                "disabled"
            },
            config.monitor.remote.len()
        );
        for target in &config.monitor.remote {
            println!("  - {}@{}:{}", target.user, target.host, target.port);
        }
    }
    Ok(())
}
