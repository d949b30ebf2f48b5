//! Remote command construction
//!
//! Only two commands ever cross the wire: a per-user process listing and
//! a fixed system-stats probe. The listing re-validates its single
//! parameter defensively; the probe is a constant with no interpolated
//! data, so that code path carries no injection risk at all.

use crate::validate::{ValidationError, validate_username};

/// Fixed probe producing one line of five numeric tokens:
/// cpu%, mem-used-MB, mem-total-MB, disk-used-GB, disk-total-GB.
pub const SYSTEM_STATS_COMMAND: &str = concat!(
    "top -bn1 | grep \"Cpu(s)\" | awk '{print $2}' | sed 's/%us,//';",
    "free -m | awk 'NR==2{printf \"%.0f %.0f\", $3,$2}';",
    "df -h / | awk 'NR==2{gsub(/[^0-9.]/, \"\", $3); gsub(/[^0-9.]/, \"\", $2); printf \" %.1f %.1f\", $3, $2}'",
);

/// Builds the process-listing command for one user:
/// `ps -u <user> -o pid,user,%cpu,%mem,stat,lstart,args --no-headers`.
///
/// The username is validated here even though config loading already
/// validated it — the builder never trusts its caller.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the username is not safe to
/// interpolate.
pub fn build_ps_command(user: &str) -> Result<String, ValidationError> {
    validate_username(user)?;
    Ok(format!(
        "ps -u {user} -o pid,user,%cpu,%mem,stat,lstart,args --no-headers"
    ))
}

/// Returns the fixed system-stats probe
#[must_use]
pub const fn system_stats_command() -> &'static str {
    SYSTEM_STATS_COMMAND
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::ssh_exec::validate_command;

    #[test]
    fn test_build_ps_command() {
        let cmd = build_ps_command("deploy").unwrap();
        assert_eq!(
            cmd,
            "ps -u deploy -o pid,user,%cpu,%mem,stat,lstart,args --no-headers"
        );
    }

    #[test]
    fn test_build_ps_command_rejects_unsafe_user() {
        assert!(build_ps_command("root; rm -rf /").is_err());
        assert!(build_ps_command("").is_err());
        assert!(build_ps_command("a`id`").is_err());
    }

    #[test]
    fn test_built_commands_pass_safety_check() {
        // Both builder outputs must clear the executor's deny list;
        // a rejection there on builder output is an invariant violation.
        let ps = build_ps_command("deploy").unwrap();
        assert!(validate_command(&ps).is_ok());
        assert!(validate_command(SYSTEM_STATS_COMMAND).is_ok());
    }

    #[test]
    fn test_probe_takes_no_parameters() {
        assert!(!SYSTEM_STATS_COMMAND.contains("{}"));
        assert_eq!(system_stats_command(), SYSTEM_STATS_COMMAND);
    }
}
