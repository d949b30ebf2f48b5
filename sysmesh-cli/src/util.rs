//! Shared utility functions used across command modules.

use std::path::Path;

use sysmesh_core::config::{ConfigManager, MonitorConfig, RemoteTarget};

use crate::error::CliError;

/// Loads the configuration from the optional custom path given on the
/// command line, falling back to the default location.
pub fn load_config(config_path: Option<&Path>) -> Result<MonitorConfig, CliError> {
    let manager = match config_path {
        Some(path) => ConfigManager::with_config_path(path.to_path_buf()),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to locate config: {e}")))?,
    };
    manager.load().map_err(|e| CliError::Config(e.to_string()))
}

/// Finds a remote target by host, trying exact match first and then a
/// case-insensitive one.
pub fn find_target<'a>(
    targets: &'a [RemoteTarget],
    host: &str,
) -> Result<&'a RemoteTarget, CliError> {
    targets
        .iter()
        .find(|t| t.host == host)
        .or_else(|| targets.iter().find(|t| t.host.eq_ignore_ascii_case(host)))
        .ok_or_else(|| CliError::TargetNotFound(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysmesh_core::config::ProcessFilterSpec;

    fn target(host: &str) -> RemoteTarget {
        RemoteTarget {
            host: host.into(),
            user: "ops".into(),
            port: 22,
            ssh_key: "~/.ssh/id_rsa".into(),
            proxy_jump: None,
            process_filters: ProcessFilterSpec::default(),
        }
    }

    #[test]
    fn test_find_target_exact_and_case_insensitive() {
        let targets = vec![target("web-01.example.com"), target("db-01.example.com")];
        assert!(find_target(&targets, "db-01.example.com").is_ok());
        assert!(find_target(&targets, "DB-01.EXAMPLE.COM").is_ok());
        assert!(matches!(
            find_target(&targets, "missing"),
            Err(CliError::TargetNotFound(_))
        ));
    }
}
