//! Integration tests for the sysmesh CLI
//!
//! These drive the built binary end-to-end: help output, config
//! validation, target lookup, one-shot cycles, and completions. No test
//! reaches the network — remote targets are only exercised through
//! validation failures and lookup errors.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to run the CLI with given arguments
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sysmesh"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

/// Helper to write a config file into a temp dir and return both
fn write_config(content: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    let path_str = path.to_string_lossy().into_owned();
    (dir, path_str)
}

fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const VALID_CONFIG: &str = r"
interval_secs: 5
monitor:
  local:
    enabled: false
    process_filters:
      keywords: [sshd]
  remote:
    - host: web-01.example.com
      user: deploy
      port: 22
      ssh_key: ~/.ssh/id_ed25519
      process_filters:
        keywords: [nginx]
";

#[test]
fn test_help_lists_commands() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = stdout_str(&output);
    assert!(stdout.contains("sysmesh"), "Help should mention program name");
    assert!(stdout.contains("start"), "Help should mention start command");
    assert!(stdout.contains("check"), "Help should mention check command");
    assert!(
        stdout.contains("validate"),
        "Help should mention validate command"
    );
    assert!(
        stdout.contains("completions"),
        "Help should mention completions command"
    );
}

#[test]
fn test_validate_accepts_good_config() {
    let (_dir, path) = write_config(VALID_CONFIG);
    let output = run_cli(&["--config", &path, "validate"]);

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    let stdout = stdout_str(&output);
    assert!(stdout.contains("Configuration OK"));
    assert!(stdout.contains("deploy@web-01.example.com:22"));
}

#[test]
fn test_validate_rejects_injection_hostname() {
    let (_dir, path) = write_config(
        r"
monitor:
  remote:
    - host: 'web;reboot'
      user: deploy
      ssh_key: ~/.ssh/id_rsa
",
    );
    let output = run_cli(&["--config", &path, "validate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("Configuration error"));
}

#[test]
fn test_validate_rejects_traversal_key_path() {
    let (_dir, path) = write_config(
        r"
monitor:
  remote:
    - host: web-01.example.com
      user: deploy
      ssh_key: ../../etc/shadow
",
    );
    let output = run_cli(&["--config", &path, "validate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("traversal"));
}

#[test]
fn test_validate_missing_config_file() {
    let output = run_cli(&["--config", "/nonexistent/sysmesh.yaml", "validate"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_check_unknown_target_exits_with_collection_failure() {
    let (_dir, path) = write_config(VALID_CONFIG);
    let output = run_cli(&["--config", &path, "check", "no-such-host.example.com"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("Target not found"));
}

#[test]
fn test_check_local_runs_without_network() {
    let (_dir, path) = write_config(VALID_CONFIG);
    let output = run_cli(&["--config", &path, "check", "local"]);

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    let stdout = stdout_str(&output);
    assert!(stdout.contains("local"));
    assert!(stdout.contains("MEM:"));
}

#[test]
fn test_start_once_with_no_targets() {
    let (_dir, path) = write_config(
        r"
interval_secs: 1
monitor:
  local:
    enabled: false
",
    );
    let output = run_cli(&["--config", &path, "start", "--once"]);

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    assert!(stdout_str(&output).contains("Starting sysmesh monitor"));
}

#[test]
fn test_quiet_suppresses_banner() {
    let (_dir, path) = write_config(
        r"
interval_secs: 1
monitor:
  local:
    enabled: false
",
    );
    let output = run_cli(&["--config", &path, "--quiet", "start", "--once"]);

    assert!(output.status.success());
    assert!(stdout_str(&output).is_empty());
}

#[test]
fn test_completions_bash() {
    let output = run_cli(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout_str(&output).contains("sysmesh"));
}
