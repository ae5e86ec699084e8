// Library exports for the two binaries and the integration tests.

/// Application version (root crate version, for use by sub-crates).
/// Sub-crates receive this via parameter rather than using
/// `env!("CARGO_PKG_VERSION")`, which resolves to the sub-crate's version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod debug;
pub mod updater;
pub mod verifier;

pub use github_known_hosts_file::TRACKED_DOMAINS;
