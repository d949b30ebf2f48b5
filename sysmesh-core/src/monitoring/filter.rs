//! Process filter engine
//!
//! Shared between the local and remote collection paths. Matching is a
//! logical OR across the three predicate categories, and OR within each
//! category's list. An empty filter spec matches nothing — absence of
//! criteria never becomes an unconditional match.

use super::metrics::MonitoredProcess;
use crate::config::ProcessFilterSpec;

/// Returns `true` if the process matches any configured predicate:
/// a keyword appearing as a (case-sensitive) substring of its name or
/// command line, its user in the user set, or its group in the group set.
#[must_use]
pub fn matches(process: &MonitoredProcess, filters: &ProcessFilterSpec) -> bool {
    filters
        .keywords
        .iter()
        .any(|kw| process.name.contains(kw.as_str()) || process.cmdline.contains(kw.as_str()))
        || filters.users.iter().any(|user| *user == process.user)
        || filters
            .groups
            .iter()
            .any(|group| !group.is_empty() && *group == process.group)
}
