//! Rewrites a known_hosts file with GitHub's current host keys.
//!
//! Every existing GitHub line is dropped and replaced by one line per
//! (tracked domain, key) pair. Other lines are carried over verbatim, comments
//! and blank lines are not.

use github_known_hosts_file::{
    KnownHosts, KnownHostsError, ensure_private_dir, render_known_hosts, tracked_entries,
    write_atomic,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort an update.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The key source produced no keys; writing would remove all GitHub trust.
    #[error("No SSH keys found in API response")]
    NoKeys,

    /// Reading or writing the known_hosts file failed.
    #[error(transparent)]
    File(#[from] KnownHostsError),
}

/// Outcome of an update (or of a dry run).
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// File that was (or would be) rewritten.
    pub path: PathBuf,
    /// `true` when nothing was written.
    pub dry_run: bool,
    /// GitHub lines in the new file, in write order.
    pub entries: Vec<String>,
    /// Number of GitHub lines found in the old file.
    pub removed: usize,
    /// Other lines carried over, in file order.
    pub preserved: Vec<String>,
}

/// Update `path` so the tracked domains carry exactly `keys`.
///
/// In `dry_run` mode the filesystem is not touched at all, not even to create
/// the parent directory.
pub fn update(path: &Path, keys: &[String], dry_run: bool) -> Result<UpdateReport, UpdateError> {
    if keys.is_empty() {
        return Err(UpdateError::NoKeys);
    }

    let existing = KnownHosts::load(path)?;
    let report = UpdateReport {
        path: path.to_path_buf(),
        dry_run,
        entries: tracked_entries(keys),
        removed: existing.tracked_count(),
        preserved: existing.other_entries().to_vec(),
    };
    log::info!(
        "{}: replacing {} GitHub entries with {}, keeping {} other entries",
        path.display(),
        report.removed,
        report.entries.len(),
        report.preserved.len()
    );

    if dry_run {
        return Ok(report);
    }

    if let Some(parent) = path.parent() {
        ensure_private_dir(parent)?;
    }
    let body = render_known_hosts(&report.entries, &report.preserved);
    write_atomic(path, &body)?;
    log::info!("Wrote {} bytes to {}", body.len(), path.display());

    Ok(report)
}

/// Print the human-readable summary for `report`.
pub fn print_report(report: &UpdateReport) {
    if report.dry_run {
        println!("🔍 DRY RUN - No changes will be made");
        println!();
        println!("Would remove all existing GitHub entries ({} found)", report.removed);
        println!("Would add {} new GitHub entries:", report.entries.len());
        for entry in &report.entries {
            println!("  {}", entry);
        }
        return;
    }

    println!("✅ Updated {}", report.path.display());
    println!("   Added {} GitHub entries", report.entries.len());
    println!("   Preserved {} other entries", report.preserved.len());
}
