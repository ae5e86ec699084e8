//! Key source: meta API first, embedded snapshot as the fallback.

use crate::error::MetaError;
use crate::http::MetaTransport;

/// Field of the meta document that lists the SSH host keys.
const SSH_KEYS_FIELD: &str = "ssh_keys";

/// Where a set of fetched keys came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Parsed from a live meta API response.
    Api,
    /// The caller asked to skip the network.
    ForcedFallback,
    /// The network failed; `reason` is the transport error message.
    NetworkFallback {
        /// Transport failure that triggered the fallback.
        reason: String,
    },
}

/// Keys returned by [`KeySource::fetch`].
#[derive(Debug, Clone)]
pub struct FetchedKeys {
    /// Opaque `"<algorithm> <material>"` strings, in response order.
    pub keys: Vec<String>,
    /// Where `keys` came from.
    pub origin: KeyOrigin,
}

impl FetchedKeys {
    /// Whether the keys came from the embedded snapshot.
    pub fn is_fallback(&self) -> bool {
        !matches!(self.origin, KeyOrigin::Api)
    }
}

/// Fetches GitHub's SSH host keys through a [`MetaTransport`].
pub struct KeySource<T> {
    transport: T,
    fallback: Vec<String>,
}

impl<T: MetaTransport> KeySource<T> {
    /// Create a key source with an explicit fallback table.
    pub fn new(transport: T, fallback: Vec<String>) -> Self {
        Self {
            transport,
            fallback,
        }
    }

    /// The fallback table this source was configured with.
    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }

    /// Fetch keys for the updater.
    ///
    /// With `use_fallback` the network is never touched. Otherwise transport
    /// failures degrade to the fallback table; a response that cannot be
    /// parsed is returned as an error.
    pub fn fetch(&self, use_fallback: bool) -> Result<FetchedKeys, MetaError> {
        if use_fallback {
            log::info!("Using {} fallback keys (API fetch skipped)", self.fallback.len());
            return Ok(FetchedKeys {
                keys: self.fallback.clone(),
                origin: KeyOrigin::ForcedFallback,
            });
        }

        match self.fetch_authoritative() {
            Ok(keys) => Ok(FetchedKeys {
                keys,
                origin: KeyOrigin::Api,
            }),
            Err(MetaError::Transport { url, message }) => {
                log::warn!("Network error fetching {}: {}; using fallback keys", url, message);
                Ok(FetchedKeys {
                    keys: self.fallback.clone(),
                    origin: KeyOrigin::NetworkFallback { reason: message },
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch keys from the API only. Used by the verifier, which never
    /// compares against the snapshot.
    pub fn fetch_authoritative(&self) -> Result<Vec<String>, MetaError> {
        let body = self.transport.get_meta()?;
        let keys = parse_meta_response(&body)?;
        log::info!("Meta API published {} SSH keys", keys.len());
        Ok(keys)
    }
}

/// Extract the `ssh_keys` list from a meta API body.
///
/// An absent field yields an empty list. A body that is not a JSON object, or
/// whose `ssh_keys` is not an array of strings, is rejected.
pub fn parse_meta_response(body: &str) -> Result<Vec<String>, MetaError> {
    let json: serde_json::Value = serde_json::from_str(body)?;

    let object = json.as_object().ok_or_else(|| {
        MetaError::UnexpectedShape("expected a JSON object at the top level".to_string())
    })?;

    let Some(field) = object.get(SSH_KEYS_FIELD) else {
        log::warn!("Meta API response has no '{}' field", SSH_KEYS_FIELD);
        return Ok(Vec::new());
    };

    let entries = field.as_array().ok_or_else(|| {
        MetaError::UnexpectedShape(format!("'{}' is not an array", SSH_KEYS_FIELD))
    })?;

    entries
        .iter()
        .map(|entry| {
            entry.as_str().map(str::to_string).ok_or_else(|| {
                MetaError::UnexpectedShape(format!(
                    "'{}' contains a non-string entry: {}",
                    SSH_KEYS_FIELD, entry
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CannedTransport {
        response: Result<String, String>,
        calls: Cell<usize>,
    }

    impl CannedTransport {
        fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                calls: Cell::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                calls: Cell::new(0),
            }
        }
    }

    impl MetaTransport for CannedTransport {
        fn get_meta(&self) -> Result<String, MetaError> {
            self.calls.set(self.calls.get() + 1);
            self.response.clone().map_err(|message| MetaError::Transport {
                url: "https://api.github.com/meta".to_string(),
                message,
            })
        }
    }

    fn snapshot() -> Vec<String> {
        vec!["ssh-ed25519 SNAPSHOT".to_string()]
    }

    #[test]
    fn test_parse_extracts_ssh_keys() {
        let body = r#"{"verifiable_password_authentication":false,"ssh_keys":["ssh-ed25519 AAA","ssh-rsa BBB"]}"#;
        assert_eq!(
            parse_meta_response(body).unwrap(),
            vec!["ssh-ed25519 AAA", "ssh-rsa BBB"]
        );
    }

    #[test]
    fn test_parse_missing_field_is_empty() {
        assert!(parse_meta_response(r#"{"hooks":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_meta_response("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, MetaError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse_meta_response(r#"["ssh-rsa AAA"]"#).unwrap_err();
        assert!(matches!(err, MetaError::UnexpectedShape(_)));
    }

    #[test]
    fn test_parse_rejects_non_string_entries() {
        let err = parse_meta_response(r#"{"ssh_keys":["ssh-rsa AAA", 42]}"#).unwrap_err();
        assert!(err.to_string().contains("non-string"));
        let err = parse_meta_response(r#"{"ssh_keys":"ssh-rsa AAA"}"#).unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn test_fetch_forced_fallback_skips_network() {
        let source = KeySource::new(CannedTransport::failing("unused"), snapshot());
        let fetched = source.fetch(true).unwrap();
        assert_eq!(fetched.keys, snapshot());
        assert_eq!(fetched.origin, KeyOrigin::ForcedFallback);
        assert_eq!(source.transport.calls.get(), 0);
    }

    #[test]
    fn test_fetch_uses_api_keys() {
        let source = KeySource::new(CannedTransport::ok(r#"{"ssh_keys":["ssh-rsa LIVE"]}"#), snapshot());
        let fetched = source.fetch(false).unwrap();
        assert_eq!(fetched.keys, vec!["ssh-rsa LIVE"]);
        assert!(!fetched.is_fallback());
    }

    #[test]
    fn test_fetch_falls_back_on_transport_error() {
        let source = KeySource::new(CannedTransport::failing("timed out"), snapshot());
        let fetched = source.fetch(false).unwrap();
        assert_eq!(fetched.keys, snapshot());
        assert_eq!(
            fetched.origin,
            KeyOrigin::NetworkFallback {
                reason: "timed out".to_string()
            }
        );
        assert!(fetched.is_fallback());
    }

    #[test]
    fn test_fetch_malformed_response_is_fatal() {
        let source = KeySource::new(CannedTransport::ok("not json"), snapshot());
        assert!(matches!(
            source.fetch(false),
            Err(MetaError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_fetch_authoritative_never_falls_back() {
        let source = KeySource::new(CannedTransport::failing("dns failure"), snapshot());
        let err = source.fetch_authoritative().unwrap_err();
        assert!(err.is_transport());
    }
}
