//! Typed errors for known_hosts I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or rewriting a known_hosts file.
#[derive(Debug, Error)]
pub enum KnownHostsError {
    /// The existing file could not be read (a missing file is not an error).
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination has no parent directory to hold the temp file.
    #[error("'{0}' has no parent directory")]
    NoParent(PathBuf),

    /// The parent directory could not be created.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating or writing the temporary file failed.
    #[error("Failed to write temporary file in '{dir}': {source}")]
    Write {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Restricting permissions on the temporary file failed.
    #[error("Failed to set permissions on '{path}': {source}")]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming the temporary file over the destination failed.
    #[error("Failed to replace '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
