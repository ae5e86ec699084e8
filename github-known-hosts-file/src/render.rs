//! Rendering of the rewritten known_hosts body.

use crate::TRACKED_DOMAINS;
use std::collections::HashSet;

/// Header comment written at the top of every rewritten file.
const FILE_HEADER: &[&str] = &[
    "# SSH known_hosts file",
    "# GitHub entries updated by update-github-known-hosts",
];

const TRACKED_HEADER: &str = "# GitHub.com SSH keys";
const OTHER_HEADER: &str = "# Other hosts";

/// One `"<domain> <key>"` line per tracked domain and key, domain-major.
///
/// Repeated keys are emitted once, at their first position.
pub fn tracked_entries<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let unique: Vec<&str> = keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|key| seen.insert(*key))
        .collect();

    TRACKED_DOMAINS
        .iter()
        .flat_map(|domain| unique.iter().map(move |key| format!("{} {}", domain, key)))
        .collect()
}

/// Build the full file body: header, tracked block, then the other hosts.
///
/// The other-hosts section (and its header) is omitted when `others` is empty.
pub fn render_known_hosts(entries: &[String], others: &[String]) -> String {
    let mut out = String::new();

    for line in FILE_HEADER {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    if !entries.is_empty() {
        out.push_str(TRACKED_HEADER);
        out.push('\n');
        for entry in entries {
            out.push_str(entry);
            out.push('\n');
        }
        out.push('\n');
    }

    if !others.is_empty() {
        out.push_str(OTHER_HEADER);
        out.push('\n');
        for line in others {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}
