//! Remote collection orchestration
//!
//! One call per target per cycle: build the process listing from the
//! target's validated user, execute it over SSH, decode and filter,
//! run the fixed system-stats probe, decode, and assemble a timestamped
//! [`RemoteMetrics`]. Each invocation is independent and stateless, so
//! targets may be collected sequentially or concurrently at the caller's
//! discretion.

use chrono::Utc;
use futures::stream::{self, StreamExt};

use super::command;
use super::metrics::RemoteMetrics;
use super::parser::OutputParser;
use super::ssh_exec::CommandExecutor;
use crate::config::RemoteTarget;
use crate::error::MonitorResult;

/// Default number of targets collected concurrently by
/// [`RemoteCollector::collect_all`]
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Collects metrics from remote targets through a [`CommandExecutor`]
#[derive(Debug, Clone)]
pub struct RemoteCollector<E> {
    executor: E,
}

impl<E: CommandExecutor> RemoteCollector<E> {
    /// Creates a collector over the given transport
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Collects processes and system stats from one target.
    ///
    /// The target is fully re-validated first; an unvalidated target
    /// never reaches the command builder or the executor.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::MonitorError`] naming the failing stage.
    /// A failure here aborts only this target's collection.
    pub async fn collect(&self, target: &RemoteTarget) -> MonitorResult<RemoteMetrics> {
        target.validate()?;

        let ps_command = command::build_ps_command(&target.user)?;
        let ps_output = self.executor.execute(target, &ps_command).await?;
        let processes = OutputParser::parse_process_table(&ps_output, &target.process_filters);

        let stats_output = self
            .executor
            .execute(target, command::system_stats_command())
            .await?;
        let system_stats = OutputParser::parse_system_stats(&stats_output)?;

        tracing::debug!(
            host = %target.host,
            matched = processes.len(),
            "remote collection complete"
        );

        Ok(RemoteMetrics {
            host: target.host.clone(),
            timestamp: Utc::now(),
            processes,
            system_stats: Some(system_stats),
        })
    }

    /// Collects from every target with bounded concurrency, pairing each
    /// result with the target's host so failures stay attributable.
    ///
    /// A failed target never aborts the others; results arrive in
    /// completion order.
    pub async fn collect_all(
        &self,
        targets: &[RemoteTarget],
        concurrency: usize,
    ) -> Vec<(String, MonitorResult<RemoteMetrics>)> {
        stream::iter(targets)
            .map(|target| async move { (target.host.clone(), self.collect(target).await) })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessFilterSpec;
    use crate::error::MonitorError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Test transport returning canned output per command shape
    struct FakeExecutor {
        ps_output: String,
        stats_output: String,
        calls: Mutex<Vec<String>>,
    }

    impl FakeExecutor {
        fn new(ps_output: &str, stats_output: &str) -> Self {
            Self {
                ps_output: ps_output.to_string(),
                stats_output: stats_output.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CommandExecutor for FakeExecutor {
        async fn execute(&self, _target: &RemoteTarget, command: &str) -> MonitorResult<String> {
            self.calls.lock().unwrap().push(command.to_string());
            if command.starts_with("ps ") {
                Ok(self.ps_output.clone())
            } else {
                Ok(self.stats_output.clone())
            }
        }
    }

    fn target(host: &str) -> RemoteTarget {
        RemoteTarget {
            host: host.into(),
            user: "deploy".into(),
            port: 22,
            ssh_key: "~/.ssh/id_ed25519".into(),
            proxy_jump: None,
            process_filters: ProcessFilterSpec {
                keywords: vec!["sshd".into()],
                users: vec![],
                groups: vec![],
            },
        }
    }

    const PS_OUTPUT: &str =
        " 1234 root 2.5 1.1 Ss Mon Jan 1 00:00:00 2024 /usr/sbin/sshd -D\n\
          5678 root 0.1 0.2 S  Mon Jan 1 00:00:00 2024 nginx: master process\n";

    #[tokio::test]
    async fn test_collect_assembles_remote_metrics() {
        let executor = FakeExecutor::new(PS_OUTPUT, "12.3 2048 8192 50.5 100.0");
        let collector = RemoteCollector::new(executor);

        let metrics = collector.collect(&target("web-01.example.com")).await.unwrap();
        assert_eq!(metrics.host, "web-01.example.com");
        assert_eq!(metrics.processes.len(), 1);
        assert_eq!(metrics.processes[0].pid, 1234);
        let stats = metrics.system_stats.unwrap();
        assert!((stats.cpu_percent - 12.3).abs() < f64::EPSILON);
        assert!((stats.disk_total_gb - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_collect_rejects_invalid_target_without_executing() {
        let executor = FakeExecutor::new(PS_OUTPUT, "12.3 2048 8192 50.5 100.0");
        let mut bad = target("web-01.example.com");
        bad.ssh_key = "../../etc/shadow".into();
        let collector = RemoteCollector::new(executor);

        let err = collector.collect(&bad).await.unwrap_err();
        assert!(matches!(err, MonitorError::Validation(_)));
        assert_eq!(collector.executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_collect_propagates_stats_parse_failure() {
        let executor = FakeExecutor::new(PS_OUTPUT, "12.3 2048");
        let collector = RemoteCollector::new(executor);

        let err = collector.collect(&target("web-01.example.com")).await.unwrap_err();
        assert!(matches!(err, MonitorError::Parse(_)));
    }

    #[tokio::test]
    async fn test_collect_all_isolates_failures_per_target() {
        let executor = FakeExecutor::new(PS_OUTPUT, "12.3 2048 8192 50.5 100.0");
        let collector = RemoteCollector::new(executor);
        let mut bad = target("bad-host.example.com");
        bad.user = "no such user".into();
        let targets = vec![target("web-01.example.com"), bad];

        let results = collector.collect_all(&targets, 2).await;
        assert_eq!(results.len(), 2);
        let ok = results.iter().find(|(h, _)| h == "web-01.example.com").unwrap();
        assert!(ok.1.is_ok());
        let failed = results.iter().find(|(h, _)| h == "bad-host.example.com").unwrap();
        assert!(failed.1.is_err());
    }
}
