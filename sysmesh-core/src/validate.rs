//! Validation of untrusted configuration values
//!
//! Every value that can end up in an SSH argument vector or a remote
//! command string passes through here first: hostnames, usernames, key
//! file paths, filter keywords, and ports. All checks are pure and
//! syntactic — nothing resolves names or touches the filesystem.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Maximum hostname length (RFC 1035)
pub const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum username length (matches `useradd` on Linux)
pub const MAX_USERNAME_LEN: usize = 32;

/// Maximum file path length (`PATH_MAX` on Linux)
pub const MAX_PATH_LEN: usize = 4096;

/// Maximum filter keyword length
pub const MAX_KEYWORD_LEN: usize = 100;

/// Characters that must never appear in a filter keyword
const KEYWORD_FORBIDDEN: &[char] = &[';', '&', '|', '$', '`', '\n', '\r'];

static HOSTNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // RFC 1123 label sequence: labels of 1-63 alphanumeric/dash chars,
    // not starting or ending with a dash, joined by dots.
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)*[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$")
        .expect("HOSTNAME_REGEX is a valid regex pattern")
});

static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPV4_REGEX is a valid regex pattern")
});

static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

/// Errors produced by the validation functions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Hostname is empty
    #[error("hostname cannot be empty")]
    EmptyHostname,
    /// Hostname exceeds [`MAX_HOSTNAME_LEN`]
    #[error("hostname too long ({0} chars, max {MAX_HOSTNAME_LEN})")]
    HostnameTooLong(usize),
    /// Hostname is neither an RFC 1123 name nor a dotted-quad IPv4 address
    #[error("invalid hostname or IP address: {0:?}")]
    InvalidHostname(String),
    /// Username is empty
    #[error("username cannot be empty")]
    EmptyUsername,
    /// Username exceeds [`MAX_USERNAME_LEN`]
    #[error("username too long ({0} chars, max {MAX_USERNAME_LEN})")]
    UsernameTooLong(usize),
    /// Username contains characters outside `[a-zA-Z0-9_-]`
    #[error("invalid username (only alphanumerics, underscore and dash allowed): {0:?}")]
    InvalidUsername(String),
    /// File path is empty
    #[error("file path cannot be empty")]
    EmptyPath,
    /// File path exceeds [`MAX_PATH_LEN`]
    #[error("file path too long ({0} chars, max {MAX_PATH_LEN})")]
    PathTooLong(usize),
    /// File path still contains `..` after lexical cleaning
    #[error("path traversal not allowed: {0:?}")]
    PathTraversal(String),
    /// File path contains a null byte, newline or carriage return
    #[error("file path contains forbidden bytes")]
    PathForbiddenBytes,
    /// Keyword is empty
    #[error("keyword cannot be empty")]
    EmptyKeyword,
    /// Keyword exceeds [`MAX_KEYWORD_LEN`]
    #[error("keyword too long ({0} chars, max {MAX_KEYWORD_LEN})")]
    KeywordTooLong(usize),
    /// Keyword contains a shell metacharacter
    #[error("keyword contains shell metacharacters: {0:?}")]
    KeywordForbiddenChars(String),
    /// Port is outside 1-65535
    #[error("port must be between 1 and 65535")]
    InvalidPort,
    /// Group name in a filter spec is empty
    #[error("group name cannot be empty")]
    EmptyGroup,
}

/// Result type for validation functions
pub type ValidationResult = Result<(), ValidationError>;

/// Validates a hostname or dotted-quad IPv4 address.
///
/// This is a purely syntactic check against injection-prone strings; it
/// never resolves the name or reaches the network.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the value is empty, longer than
/// [`MAX_HOSTNAME_LEN`], or matches neither accepted format.
pub fn validate_hostname(host: &str) -> ValidationResult {
    if host.is_empty() {
        return Err(ValidationError::EmptyHostname);
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(ValidationError::HostnameTooLong(host.len()));
    }
    if !HOSTNAME_REGEX.is_match(host) && !IPV4_REGEX.is_match(host) {
        return Err(ValidationError::InvalidHostname(host.to_string()));
    }
    Ok(())
}

/// Validates a username for use in SSH destinations and `ps -u`.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the value is empty, longer than
/// [`MAX_USERNAME_LEN`], or contains anything outside `[a-zA-Z0-9_-]`.
pub fn validate_username(user: &str) -> ValidationResult {
    if user.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if user.len() > MAX_USERNAME_LEN {
        return Err(ValidationError::UsernameTooLong(user.len()));
    }
    if !USERNAME_REGEX.is_match(user) {
        return Err(ValidationError::InvalidUsername(user.to_string()));
    }
    Ok(())
}

/// Validates a file path (SSH identity file).
///
/// # Errors
///
/// Returns a [`ValidationError`] if the value is empty, longer than
/// [`MAX_PATH_LEN`], contains `..` after lexical cleaning, or contains a
/// null byte / newline / carriage return.
pub fn validate_file_path(path: &str) -> ValidationResult {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if path.len() > MAX_PATH_LEN {
        return Err(ValidationError::PathTooLong(path.len()));
    }
    if path.contains(['\0', '\n', '\r']) {
        return Err(ValidationError::PathForbiddenBytes);
    }
    let cleaned = lexical_clean(Path::new(path));
    if cleaned
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ValidationError::PathTraversal(path.to_string()));
    }
    Ok(())
}

/// Validates a process filter keyword.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the value is empty, longer than
/// [`MAX_KEYWORD_LEN`], or contains any shell metacharacter from the
/// forbidden set (`; & | $ ` newline carriage-return`).
pub fn validate_keyword(keyword: &str) -> ValidationResult {
    if keyword.is_empty() {
        return Err(ValidationError::EmptyKeyword);
    }
    if keyword.len() > MAX_KEYWORD_LEN {
        return Err(ValidationError::KeywordTooLong(keyword.len()));
    }
    if keyword.contains(KEYWORD_FORBIDDEN) {
        return Err(ValidationError::KeywordForbiddenChars(keyword.to_string()));
    }
    Ok(())
}

/// Validates a TCP port number.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPort`] if the port is zero.
pub fn validate_port(port: u16) -> ValidationResult {
    if port == 0 {
        return Err(ValidationError::InvalidPort);
    }
    Ok(())
}

/// Lexically cleans a path: resolves `.` and inner `..` components
/// without touching the filesystem. Leading `..` components that cannot
/// be resolved are kept, so the caller can reject them.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Pop a normal component if there is one to cancel;
                // otherwise the ".." escapes the path prefix and stays.
                if matches!(cleaned.components().next_back(), Some(Component::Normal(_))) {
                    cleaned.pop();
                } else {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
