//! Parser for ~/.ssh/known_hosts files.
//!
//! Produces the two views the tools need: the non-GitHub lines the updater
//! carries over, and the per-domain key sets the verifier compares.

use crate::TRACKED_DOMAINS;
use crate::error::KnownHostsError;
use crate::line::{KnownHostsLine, classify};
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::Path;

/// Read a known_hosts file. A missing file reads as empty.
pub fn read_known_hosts(path: &Path) -> Result<String, KnownHostsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} does not exist, treating as empty", path.display());
            Ok(String::new())
        }
        Err(source) => Err(KnownHostsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Classified contents of a known_hosts file.
#[derive(Debug, Clone, Default)]
pub struct KnownHosts {
    tracked: Vec<(&'static str, String)>,
    other: Vec<String>,
}

impl KnownHosts {
    /// Load and classify the file at `path`.
    pub fn load(path: &Path) -> Result<Self, KnownHostsError> {
        Ok(Self::parse(&read_known_hosts(path)?))
    }

    /// Classify file contents. Blank and comment lines are dropped.
    pub fn parse(content: &str) -> Self {
        let mut hosts = Self::default();

        for line in content.lines() {
            match classify(line) {
                KnownHostsLine::Blank | KnownHostsLine::Comment(_) => {}
                KnownHostsLine::Tracked { domain, key } => {
                    hosts.tracked.push((domain, key.to_string()));
                }
                KnownHostsLine::Other(raw) => hosts.other.push(raw.to_string()),
            }
        }

        log::debug!(
            "Parsed known_hosts: {} tracked, {} other",
            hosts.tracked.len(),
            hosts.other.len()
        );
        hosts
    }

    /// Non-GitHub lines, verbatim and in file order.
    pub fn other_entries(&self) -> &[String] {
        &self.other
    }

    /// Number of lines that belong to a tracked domain.
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Key set per tracked domain. Every domain is present, possibly empty.
    pub fn tracked_keys(&self) -> BTreeMap<&'static str, BTreeSet<String>> {
        let mut keys: BTreeMap<&'static str, BTreeSet<String>> = TRACKED_DOMAINS
            .iter()
            .map(|domain| (*domain, BTreeSet::new()))
            .collect();

        for (domain, key) in &self.tracked {
            keys.entry(*domain).or_default().insert(key.clone());
        }
        keys
    }
}
