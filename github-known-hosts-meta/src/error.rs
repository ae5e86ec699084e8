//! Typed errors for fetching GitHub's SSH host keys.
//!
//! Callers distinguish two classes: [`MetaError::Transport`] is recoverable
//! (the updater falls back to the embedded snapshot), everything else means
//! the endpoint answered with something we cannot use.

use thiserror::Error;

/// Errors produced while fetching or parsing the meta API response.
#[derive(Debug, Error)]
pub enum MetaError {
    /// The endpoint URL failed validation (scheme or host allowlist).
    #[error("Invalid meta API URL: {0}")]
    InvalidUrl(String),

    /// DNS, connect, TLS, timeout, non-2xx status, or a failed body read.
    #[error("Failed to fetch '{url}': {message}")]
    Transport {
        /// URL that was requested.
        url: String,
        /// Human-readable transport failure.
        message: String,
    },

    /// The response body was not valid JSON.
    #[error("Error parsing API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The response was JSON but not shaped like the meta document.
    #[error("Unexpected API response: {0}")]
    UnexpectedShape(String),
}

impl MetaError {
    /// Whether the updater may recover from this error with fallback keys.
    pub fn is_transport(&self) -> bool {
        matches!(self, MetaError::Transport { .. })
    }
}
