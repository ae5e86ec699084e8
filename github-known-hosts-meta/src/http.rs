//! HTTP transport for the GitHub meta API, using ureq with native-tls.

use crate::error::MetaError;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// GitHub's public metadata endpoint (carries `ssh_keys`).
pub const GITHUB_META_API: &str = "https://api.github.com/meta";

/// Default request timeout for the meta API call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum response body size for API responses (10 MB).
pub const MAX_API_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Hostnames the transport is allowed to contact.
const ALLOWED_HOSTS: &[&str] = &["api.github.com"];

/// Something that can produce the raw meta API body.
///
/// The production implementation is [`HttpTransport`]; tests substitute a
/// canned response or a simulated transport failure.
pub trait MetaTransport {
    /// Fetch the meta document body.
    ///
    /// Connection-level failures must be reported as [`MetaError::Transport`]
    /// so the caller can decide whether to fall back.
    fn get_meta(&self) -> Result<String, MetaError>;
}

/// Validate that a URL is safe to request.
///
/// Enforces HTTPS and the [`ALLOWED_HOSTS`] allowlist.
pub fn validate_meta_url(url: &str) -> Result<(), MetaError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| MetaError::InvalidUrl(format!("'{}': {}", url, e)))?;

    match parsed.scheme() {
        "https" => {}
        scheme => {
            return Err(MetaError::InvalidUrl(format!(
                "insecure scheme '{}' rejected; only HTTPS is allowed. URL: {}",
                scheme, url
            )));
        }
    }

    let host = parsed.host_str().unwrap_or("");
    if !ALLOWED_HOSTS.contains(&host) {
        return Err(MetaError::InvalidUrl(format!(
            "host '{}' is not in the allowed list ({}). URL: {}",
            host,
            ALLOWED_HOSTS.join(", "),
            url
        )));
    }

    Ok(())
}

/// Create an HTTP agent configured with native-tls and a global timeout.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Blocking HTTPS transport for [`GITHUB_META_API`].
pub struct HttpTransport {
    agent: Agent,
    url: String,
    user_agent: String,
}

impl HttpTransport {
    /// Create a transport that identifies itself with `user_agent`.
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            url: GITHUB_META_API.to_string(),
            user_agent: user_agent.into(),
        }
    }

    /// The URL this transport requests.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MetaTransport for HttpTransport {
    fn get_meta(&self) -> Result<String, MetaError> {
        // Validate at call time so a changed endpoint is caught before any I/O.
        validate_meta_url(&self.url)?;

        log::debug!("GET {} (User-Agent: {})", self.url, self.user_agent);

        let transport_err = |e: ureq::Error| MetaError::Transport {
            url: self.url.clone(),
            message: e.to_string(),
        };

        let mut body = self
            .agent
            .get(self.url.as_str())
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/vnd.github+json")
            .call()
            .map_err(transport_err)?
            .into_body();

        let body_str = body
            .with_config()
            .limit(MAX_API_RESPONSE_SIZE)
            .read_to_string()
            .map_err(transport_err)?;

        log::debug!("Meta API returned {} bytes", body_str.len());
        Ok(body_str)
    }
}
