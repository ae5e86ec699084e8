//! Shared integration test helpers.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` suppresses warnings when a file uses only some
//! helpers.

#![allow(dead_code)]

use github_known_hosts_meta::{KeySource, MetaError, MetaTransport};
use std::path::PathBuf;
use tempfile::TempDir;

/// Canned meta API transport.
pub struct FakeTransport {
    response: Result<String, String>,
}

impl MetaTransport for FakeTransport {
    fn get_meta(&self) -> Result<String, MetaError> {
        self.response.clone().map_err(|message| MetaError::Transport {
            url: "https://api.github.com/meta".to_string(),
            message,
        })
    }
}

/// A meta API body publishing `keys`.
pub fn meta_body(keys: &[&str]) -> String {
    serde_json::json!({
        "verifiable_password_authentication": false,
        "ssh_keys": keys,
    })
    .to_string()
}

/// Key source whose API publishes `keys`; fallback is `["ssh-ed25519 FALLBACK"]`.
pub fn publishing(keys: &[&str]) -> KeySource<FakeTransport> {
    responding(&meta_body(keys))
}

/// Key source whose API returns `body` verbatim.
pub fn responding(body: &str) -> KeySource<FakeTransport> {
    KeySource::new(
        FakeTransport {
            response: Ok(body.to_string()),
        },
        fallback(),
    )
}

/// Key source whose transport always fails.
pub fn unreachable() -> KeySource<FakeTransport> {
    KeySource::new(
        FakeTransport {
            response: Err("connection refused".to_string()),
        },
        fallback(),
    )
}

pub fn fallback() -> Vec<String> {
    vec!["ssh-ed25519 FALLBACK".to_string()]
}

/// Temp dir plus a `.ssh/known_hosts` path inside it (not created).
///
/// Keep the `TempDir` alive for the duration of the test.
pub fn known_hosts_path() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(".ssh").join("known_hosts");
    (dir, path)
}

/// Write `contents` to `path`, creating the parent directory.
pub fn seed(path: &std::path::Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}
