//! known_hosts handling for the GitHub-owned SSH hosts.
//!
//! - `line`: classification of a single line into a tagged variant
//! - `known_hosts`: reading a file and extracting the updater/verifier views
//! - `render`: building the tracked block and the rewritten file body
//! - `atomic`: private-directory creation and temp-file-then-rename writes

pub mod atomic;
pub mod error;
pub mod known_hosts;
pub mod line;
pub mod render;

pub use atomic::{ensure_private_dir, write_atomic};
pub use error::KnownHostsError;
pub use known_hosts::{KnownHosts, read_known_hosts};
pub use line::{KnownHostsLine, classify};
pub use render::{render_known_hosts, tracked_entries};

/// Hostnames treated as GitHub-owned, in output order.
pub const TRACKED_DOMAINS: [&str; 2] = ["github.com", "ssh.github.com"];
