//! Atomic replacement of a known_hosts file.
//!
//! The new contents go to a temporary file in the destination's directory, so
//! the final rename stays on one filesystem. The temp file is a
//! [`tempfile::NamedTempFile`]: every return path that does not reach
//! `persist` drops it, which deletes it.

use crate::error::KnownHostsError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix for the temporary file created next to the destination.
const TEMP_PREFIX: &str = ".known_hosts.tmp";

/// Directory that holds `path`, with `""` mapped to the current directory.
fn parent_dir(path: &Path) -> Result<PathBuf, KnownHostsError> {
    match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(p) => Ok(p.to_path_buf()),
        None => Err(KnownHostsError::NoParent(path.to_path_buf())),
    }
}

/// Create `dir` and any missing parents. New directories are owner-only on
/// Unix; existing directories are left untouched.
pub fn ensure_private_dir(dir: &Path) -> Result<(), KnownHostsError> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir).map_err(|source| KnownHostsError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    log::info!("Created directory {}", dir.display());
    Ok(())
}

/// Replace `path` with `contents` via temp file and rename.
///
/// The destination is either left untouched or fully replaced; it is never
/// observed half-written. The result is owner read/write only on Unix.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), KnownHostsError> {
    let dir = parent_dir(path)?;
    let write_err = |source| KnownHostsError::Write {
        dir: dir.clone(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(&dir)
        .map_err(write_err)?;
    log::debug!("Writing {} bytes to {}", contents.len(), tmp.path().display());

    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o600)).map_err(
            |source| KnownHostsError::Permissions {
                path: tmp.path().to_path_buf(),
                source,
            },
        )?;
    }

    tmp.persist(path).map_err(|e| KnownHostsError::Persist {
        path: path.to_path_buf(),
        source: std::io::Error::from(e),
    })?;
    Ok(())
}
