//! Compares local GitHub entries with the published key set.
//!
//! Domains are judged independently: a perfect match on one domain does not
//! offset drift on the other.

use github_known_hosts_file::{KnownHosts, KnownHostsError, TRACKED_DOMAINS};
use github_known_hosts_meta::{KeySource, MetaError, MetaTransport};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

/// Why a verification could not be carried out.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The published keys could not be fetched or parsed.
    #[error("Could not fetch keys from API: {0}")]
    Fetch(#[from] MetaError),

    /// The local file could not be read.
    #[error(transparent)]
    File(#[from] KnownHostsError),
}

/// State of one tracked domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    /// The file has no entries for this domain.
    NoKeys,
    /// Local keys equal the published set.
    Match,
    /// Extra or missing keys.
    Drift,
}

/// Comparison result for one tracked domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: &'static str,
    /// Distinct local keys for the domain.
    pub local_count: usize,
    /// Local keys GitHub does not publish.
    pub extra: BTreeSet<String>,
    /// Published keys absent locally.
    pub missing: BTreeSet<String>,
}

impl DomainReport {
    pub fn status(&self) -> DomainStatus {
        if self.local_count == 0 {
            DomainStatus::NoKeys
        } else if self.extra.is_empty() && self.missing.is_empty() {
            DomainStatus::Match
        } else {
            DomainStatus::Drift
        }
    }
}

/// Result of comparing a file against the published keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The file has no GitHub entries at all.
    NoTrackedEntries,
    /// One report per tracked domain, in [`TRACKED_DOMAINS`] order.
    Compared(Vec<DomainReport>),
}

impl Verification {
    /// `true` only when every tracked domain matches exactly.
    pub fn is_ok(&self) -> bool {
        match self {
            Verification::NoTrackedEntries => false,
            Verification::Compared(reports) => reports
                .iter()
                .all(|r| r.status() == DomainStatus::Match),
        }
    }

    /// Process exit code: 0 on exact match, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_ok() { 0 } else { 1 }
    }
}

/// Compare per-domain local keys with the published set.
pub fn compare(
    local: &BTreeMap<&'static str, BTreeSet<String>>,
    official: &BTreeSet<String>,
) -> Verification {
    if local.values().all(BTreeSet::is_empty) {
        return Verification::NoTrackedEntries;
    }

    let empty = BTreeSet::new();
    let reports = TRACKED_DOMAINS
        .iter()
        .copied()
        .map(|domain| {
            let keys = local.get(domain).unwrap_or(&empty);
            let (extra, missing) = if keys.is_empty() {
                (BTreeSet::new(), BTreeSet::new())
            } else {
                (
                    keys.difference(official).cloned().collect(),
                    official.difference(keys).cloned().collect(),
                )
            };
            DomainReport {
                domain,
                local_count: keys.len(),
                extra,
                missing,
            }
        })
        .collect();

    Verification::Compared(reports)
}

/// Outcome of [`verify`].
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// Number of distinct keys GitHub publishes.
    pub official_count: usize,
    pub verification: Verification,
}

/// Fetch the published keys (no fallback) and compare `path` against them.
pub fn verify<T: MetaTransport>(
    path: &Path,
    source: &KeySource<T>,
) -> Result<VerifyOutcome, VerifyError> {
    let official: BTreeSet<String> = source.fetch_authoritative()?.into_iter().collect();
    let local = KnownHosts::load(path)?.tracked_keys();
    let verification = compare(&local, &official);

    if let Verification::Compared(reports) = &verification {
        for report in reports {
            for key in &report.extra {
                log::debug!("{}: unknown key {}", report.domain, key);
            }
            for key in &report.missing {
                log::debug!("{}: missing key {}", report.domain, key);
            }
        }
    }

    Ok(VerifyOutcome {
        official_count: official.len(),
        verification,
    })
}

/// Print the human-readable summary for `outcome`.
pub fn print_outcome(path: &Path, outcome: &VerifyOutcome) {
    println!("📦 GitHub publishes {} official SSH keys", outcome.official_count);

    let reports = match &outcome.verification {
        Verification::NoTrackedEntries => {
            println!("❌ No GitHub keys found in {}", path.display());
            println!("   Run update-github-known-hosts to add them");
            return;
        }
        Verification::Compared(reports) => reports,
    };

    for report in reports {
        if report.status() == DomainStatus::NoKeys {
            println!("⚠️  {}: No keys found", report.domain);
            continue;
        }

        println!();
        println!("🔑 {}: {} keys", report.domain, report.local_count);
        if !report.extra.is_empty() {
            println!(
                "   ⚠️  {} UNKNOWN keys (not in GitHub's official list)",
                report.extra.len()
            );
        }
        if !report.missing.is_empty() {
            println!(
                "   ⚠️  {} MISSING keys (published by GitHub)",
                report.missing.len()
            );
        }
        if report.status() == DomainStatus::Match {
            println!("   ✅ All keys match GitHub's official list");
        }
    }

    println!();
    if outcome.verification.is_ok() {
        println!("✅ Your known_hosts is up to date with GitHub!");
    } else {
        println!("⚠️  Your known_hosts needs updating");
        println!("   Run: update-github-known-hosts");
    }
}
