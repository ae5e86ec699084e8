//! Settings shared by both tools.
//!
//! Loaded from an optional YAML file. Every field has a default, so a missing
//! default-location file is the same as an empty one.
//!
//! ```yaml
//! known_hosts: ~/.ssh/known_hosts
//! request_timeout_secs: 10
//! fallback_keys:
//!   - ssh-ed25519 AAAA...
//! ```

use github_known_hosts_meta::{DEFAULT_TIMEOUT, fallback_keys};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "github-known-hosts";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Upper bound for `request_timeout_secs`.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`Settings`].
    #[error("YAML parse error in config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),

    /// No home directory to derive the default known_hosts path from.
    #[error("Could not determine the home directory; pass --known-hosts")]
    NoHomeDir,
}

/// Tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// known_hosts path used when `--known-hosts` is not given.
    pub known_hosts: Option<PathBuf>,
    /// Global timeout for the meta API request, in seconds.
    pub request_timeout_secs: u64,
    /// Keys used when the API is skipped or unreachable.
    pub fallback_keys: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            known_hosts: None,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            fallback_keys: fallback_keys(),
        }
    }
}

impl Settings {
    /// Default config file location (`<config dir>/github-known-hosts/config.yaml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present and defaults apply otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        log::info!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    /// Parse and validate settings from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings =
            serde_yaml_ng::from_str(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "request_timeout_secs must be between 1 and {}, got {}",
                MAX_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the known_hosts path: flag, then config, then `~/.ssh/known_hosts`.
    pub fn known_hosts_path(&self, flag: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(p) = flag {
            return Ok(p.to_path_buf());
        }
        let home = dirs::home_dir();
        match &self.known_hosts {
            Some(p) => expand_home(p, home.as_deref()),
            None => home
                .map(|h| h.join(".ssh").join("known_hosts"))
                .ok_or(ConfigError::NoHomeDir),
        }
    }
}

/// Expand a leading `~/` against `home`.
fn expand_home(path: &Path, home: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path.strip_prefix("~") {
        Ok(rest) => home.map(|h| h.join(rest)).ok_or(ConfigError::NoHomeDir),
        Err(_) => Ok(path.to_path_buf()),
    }
}
