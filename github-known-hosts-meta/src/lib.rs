//! GitHub SSH host key source.
//!
//! Provides:
//! - `http`: ureq agent construction and endpoint validation
//! - `source`: the `KeySource` that fetches `ssh_keys` from the meta API and
//!   falls back to an embedded snapshot when the network is unavailable
//! - `fallback`: the embedded snapshot of GitHub's published keys
//! - `error`: typed errors for the fetch path

pub mod error;
pub mod fallback;
pub mod http;
pub mod source;

pub use error::MetaError;
pub use fallback::{FALLBACK_SNAPSHOT_DATE, FALLBACK_SSH_KEYS, fallback_keys};
pub use http::{DEFAULT_TIMEOUT, GITHUB_META_API, HttpTransport, MetaTransport};
pub use source::{FetchedKeys, KeyOrigin, KeySource, parse_meta_response};
