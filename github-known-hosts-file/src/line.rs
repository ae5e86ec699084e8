//! Classification of a single known_hosts line.
//!
//! Grammar shared by the updater and the verifier: the host token is the text
//! before the first `,` or ASCII whitespace character. A line is a tracked
//! entry when that token is one of [`TRACKED_DOMAINS`] and something other
//! than whitespace follows the separator. The key is that remainder, trimmed.

use crate::TRACKED_DOMAINS;

/// One line of a known_hosts file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownHostsLine<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// Starts with `#`.
    Comment(&'a str),
    /// Entry for a GitHub-owned host.
    Tracked {
        /// Matching entry of [`TRACKED_DOMAINS`].
        domain: &'static str,
        /// Everything after the host token and its separator, trimmed.
        key: &'a str,
    },
    /// Any other content, kept verbatim.
    Other(&'a str),
}

impl KnownHostsLine<'_> {
    /// Whether this line carries content that survives a rewrite.
    pub fn is_other(&self) -> bool {
        matches!(self, KnownHostsLine::Other(_))
    }
}

/// Classify one line. `line` must not contain its line terminator.
pub fn classify(line: &str) -> KnownHostsLine<'_> {
    if line.trim().is_empty() {
        return KnownHostsLine::Blank;
    }
    if line.starts_with('#') {
        return KnownHostsLine::Comment(line);
    }
    match split_tracked(line) {
        Some((domain, key)) => KnownHostsLine::Tracked { domain, key },
        None => KnownHostsLine::Other(line),
    }
}

fn split_tracked(line: &str) -> Option<(&'static str, &str)> {
    let sep = line.find(|c: char| c == ',' || c.is_ascii_whitespace())?;
    let token = &line[..sep];
    let domain = TRACKED_DOMAINS.iter().copied().find(|d| *d == token)?;

    // Separators are single-byte ASCII, so `sep + 1` is a char boundary.
    let key = line[sep + 1..].trim();
    if key.is_empty() {
        return None;
    }
    Some((domain, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_space_separated() {
        assert_eq!(
            classify("github.com ssh-ed25519 AAAAC3"),
            KnownHostsLine::Tracked {
                domain: "github.com",
                key: "ssh-ed25519 AAAAC3"
            }
        );
        assert_eq!(
            classify("ssh.github.com ecdsa-sha2-nistp256 AAAAE2"),
            KnownHostsLine::Tracked {
                domain: "ssh.github.com",
                key: "ecdsa-sha2-nistp256 AAAAE2"
            }
        );
    }

    #[test]
    fn test_tracked_tab_and_repeated_whitespace() {
        assert_eq!(
            classify("github.com\t  ssh-rsa AAAAB3  "),
            KnownHostsLine::Tracked {
                domain: "github.com",
                key: "ssh-rsa AAAAB3"
            }
        );
    }

    #[test]
    fn test_tracked_comma_keeps_remainder_as_key() {
        assert_eq!(
            classify("github.com,140.82.112.3 ssh-rsa AAAAB3"),
            KnownHostsLine::Tracked {
                domain: "github.com",
                key: "140.82.112.3 ssh-rsa AAAAB3"
            }
        );
    }

    #[test]
    fn test_lookalike_hosts_are_other() {
        for line in [
            "gist.github.com ssh-rsa AAAA",
            "github.com.evil.example ssh-rsa AAAA",
            "api.github.com ssh-rsa AAAA",
            "[github.com]:443 ssh-rsa AAAA",
            "|1|abc=|def= ssh-rsa AAAA",
            "@cert-authority github.com ssh-rsa AAAA",
            "  github.com ssh-rsa AAAA",
        ] {
            assert_eq!(classify(line), KnownHostsLine::Other(line), "{line}");
        }
    }

    #[test]
    fn test_domain_without_key_is_other() {
        assert_eq!(classify("github.com"), KnownHostsLine::Other("github.com"));
        assert_eq!(classify("github.com   "), KnownHostsLine::Other("github.com   "));
        assert_eq!(classify("github.com,"), KnownHostsLine::Other("github.com,"));
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(classify(""), KnownHostsLine::Blank);
        assert_eq!(classify("   \t"), KnownHostsLine::Blank);
        assert_eq!(
            classify("# GitHub.com SSH keys"),
            KnownHostsLine::Comment("# GitHub.com SSH keys")
        );
        assert!(classify("example.org ssh-rsa AAAA").is_other());
    }
}
