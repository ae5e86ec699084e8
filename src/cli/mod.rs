//! Command-line interface for the two tools.
//!
//! Each binary parses its own `clap` struct and hands it to `run_update` /
//! `run_verify`, which return the process exit code. The `*_with_source`
//! variants take an already-built [`KeySource`] so the whole flow can be
//! driven without network access.

use crate::config::Settings;
use crate::updater::{self, UpdateError};
use crate::verifier::{self, VerifyError};
use anyhow::Context;
use clap::{Args, Parser};
use github_known_hosts_meta::{
    FALLBACK_SNAPSHOT_DATE, HttpTransport, KeyOrigin, KeySource, MetaTransport, fallback_keys,
};
use std::path::{Path, PathBuf};

const UPDATE_EXAMPLES: &str = "\
Examples:
  update-github-known-hosts                    # Update known_hosts (tries API, falls back to cached keys)
  update-github-known-hosts --use-fallback     # Use cached keys without trying API
  update-github-known-hosts --dry-run          # Show what would change
  update-github-known-hosts --known-hosts=/custom/path/known_hosts";

/// Update GitHub SSH keys in known_hosts from the official API
#[derive(Parser, Debug)]
#[command(name = "update-github-known-hosts")]
#[command(version, about, long_about = None, after_help = UPDATE_EXAMPLES)]
pub struct UpdateCli {
    /// Show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Path to known_hosts file (default: ~/.ssh/known_hosts)
    #[arg(long, value_name = "PATH")]
    pub known_hosts: Option<PathBuf>,

    /// Use fallback keys without trying to fetch from API (useful in restricted networks)
    #[arg(long)]
    pub use_fallback: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Verify GitHub SSH keys in known_hosts against the official API
#[derive(Parser, Debug)]
#[command(name = "verify-github-known-hosts")]
#[command(version, about, long_about = None)]
pub struct VerifyCli {
    /// Path to known_hosts file (default: ~/.ssh/known_hosts)
    #[arg(long, value_name = "PATH")]
    pub known_hosts: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Flags shared by both tools.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Config file (default: <config dir>/github-known-hosts/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// `User-Agent` sent by a tool, e.g. `GitHubKnownHostsUpdater/0.1.0`.
pub fn user_agent(tool: &str) -> String {
    format!("GitHubKnownHosts{}/{}", tool, crate::VERSION)
}

/// Logging, settings, and known_hosts path resolution shared by both tools.
fn prepare(common: &CommonArgs, known_hosts: Option<&Path>) -> anyhow::Result<(Settings, PathBuf)> {
    crate::debug::init_log_bridge(common.log_level.map(LogLevelArg::to_level_filter));

    let settings =
        Settings::load(common.config.as_deref()).context("Failed to load configuration")?;
    let path = settings
        .known_hosts_path(known_hosts)
        .context("Failed to resolve known_hosts path")?;
    log::info!("Using known_hosts at {}", path.display());
    Ok((settings, path))
}

fn key_source(settings: &Settings, tool: &str) -> KeySource<HttpTransport> {
    let transport = HttpTransport::new(user_agent(tool), settings.request_timeout());
    KeySource::new(transport, settings.fallback_keys.clone())
}

/// Run `update-github-known-hosts`. Returns the exit code.
pub fn run_update(cli: UpdateCli) -> i32 {
    let (settings, path) = match prepare(&cli.common, cli.known_hosts.as_deref()) {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("❌ {e:#}");
            return 1;
        }
    };
    let source = key_source(&settings, "Updater");
    update_with_source(&path, &source, cli.use_fallback, cli.dry_run)
}

/// Fetch keys from `source` and update `path`. Returns the exit code.
pub fn update_with_source<T: MetaTransport>(
    path: &Path,
    source: &KeySource<T>,
    use_fallback: bool,
    dry_run: bool,
) -> i32 {
    if !use_fallback {
        println!("🔑 Fetching GitHub SSH keys from API...");
    }

    let fetched = match source.fetch(use_fallback) {
        Ok(fetched) => fetched,
        Err(e) => {
            eprintln!("❌ {e}");
            return 1;
        }
    };

    match &fetched.origin {
        KeyOrigin::Api => {}
        KeyOrigin::ForcedFallback => println!("📦 Using fallback SSH keys (API fetch skipped)"),
        KeyOrigin::NetworkFallback { reason } => {
            eprintln!("⚠️  Network error fetching GitHub SSH keys: {reason}");
            if source.fallback() == fallback_keys().as_slice() {
                eprintln!("   Using fallback keys instead (current as of {FALLBACK_SNAPSHOT_DATE})");
            } else {
                eprintln!("   Using fallback keys from configuration instead");
            }
        }
    }

    if fetched.keys.is_empty() {
        eprintln!("⚠️  No SSH keys found in API response");
        return 1;
    }
    println!("📦 Retrieved {} SSH keys from GitHub", fetched.keys.len());

    match updater::update(path, &fetched.keys, dry_run) {
        Ok(report) => {
            updater::print_report(&report);
            0
        }
        Err(UpdateError::NoKeys) => {
            eprintln!("⚠️  No SSH keys found in API response");
            1
        }
        Err(e) => {
            eprintln!("❌ Error writing known_hosts: {e}");
            1
        }
    }
}

/// Run `verify-github-known-hosts`. Returns the exit code.
pub fn run_verify(cli: VerifyCli) -> i32 {
    let (settings, path) = match prepare(&cli.common, cli.known_hosts.as_deref()) {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("❌ {e:#}");
            return 1;
        }
    };
    let source = key_source(&settings, "Verifier");
    verify_with_source(&path, &source)
}

/// Compare `path` with the keys from `source`. Returns the exit code.
pub fn verify_with_source<T: MetaTransport>(path: &Path, source: &KeySource<T>) -> i32 {
    println!("🔍 Checking GitHub SSH keys...");
    println!();

    match verifier::verify(path, source) {
        Ok(outcome) => {
            verifier::print_outcome(path, &outcome);
            outcome.verification.exit_code()
        }
        Err(VerifyError::Fetch(e)) => {
            eprintln!("❌ Error fetching GitHub SSH keys: {e}");
            eprintln!("⚠️  Could not fetch keys from API. Cannot verify.");
            1
        }
        Err(e) => {
            eprintln!("❌ {e}");
            1
        }
    }
}
