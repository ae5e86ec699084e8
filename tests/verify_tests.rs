//! End-to-end tests for the verifier flow with a fake meta API.

mod common;

use common::{known_hosts_path, publishing, responding, seed, unreachable};
use github_known_hosts::cli::{update_with_source, verify_with_source};
use github_known_hosts::verifier::{DomainStatus, Verification, VerifyError, verify};
use std::collections::BTreeSet;

fn set(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn test_update_then_verify_matches() {
    let (_dir, path) = known_hosts_path();
    seed(&path, "example.org ssh-rsa OTHER\n");
    let keys = ["ssh-ed25519 A", "ecdsa-sha2-nistp256 B", "ssh-rsa C"];

    assert_eq!(update_with_source(&path, &publishing(&keys), false, false), 0);

    let outcome = verify(&path, &publishing(&keys)).unwrap();
    assert_eq!(outcome.official_count, 3);
    let Verification::Compared(reports) = &outcome.verification else {
        panic!("expected per-domain reports");
    };
    for report in reports {
        assert_eq!(report.status(), DomainStatus::Match, "{}", report.domain);
        assert!(report.extra.is_empty() && report.missing.is_empty());
    }
    assert_eq!(verify_with_source(&path, &publishing(&keys)), 0);
}

#[test]
fn test_published_superset_reports_missing() {
    let (_dir, path) = known_hosts_path();
    seed(&path, "github.com keyA\nssh.github.com keyA\n");

    let outcome = verify(&path, &publishing(&["keyA", "keyB"])).unwrap();
    let Verification::Compared(reports) = &outcome.verification else {
        panic!("expected per-domain reports");
    };
    assert_eq!(reports.len(), 2);
    for report in reports {
        assert!(report.extra.is_empty());
        assert_eq!(report.missing, set(&["keyB"]));
    }
    assert_eq!(outcome.verification.exit_code(), 1);
    assert_eq!(verify_with_source(&path, &publishing(&["keyA", "keyB"])), 1);
}

#[test]
fn test_published_subset_reports_extra() {
    let (_dir, path) = known_hosts_path();
    seed(&path, "github.com keyA\ngithub.com keyB\nssh.github.com keyA\n");

    let outcome = verify(&path, &publishing(&["keyA"])).unwrap();
    let Verification::Compared(reports) = &outcome.verification else {
        panic!("expected per-domain reports");
    };
    assert_eq!(reports[0].extra, set(&["keyB"]));
    assert!(reports[0].missing.is_empty());
    assert_eq!(reports[1].status(), DomainStatus::Match);
    assert_eq!(outcome.verification.exit_code(), 1);
}

#[test]
fn test_missing_domain_fails() {
    let (_dir, path) = known_hosts_path();
    seed(&path, "github.com keyA\n");
    assert_eq!(verify_with_source(&path, &publishing(&["keyA"])), 1);
}

#[test]
fn test_no_github_entries_fails() {
    let (_dir, path) = known_hosts_path();
    seed(&path, "# only comments\nexample.org ssh-rsa X\n");
    let outcome = verify(&path, &publishing(&["keyA"])).unwrap();
    assert_eq!(outcome.verification, Verification::NoTrackedEntries);
    assert_eq!(verify_with_source(&path, &publishing(&["keyA"])), 1);
}

#[test]
fn test_missing_file_fails() {
    let (_dir, path) = known_hosts_path();
    assert_eq!(verify_with_source(&path, &publishing(&["keyA"])), 1);
    assert!(!path.exists());
}

#[test]
fn test_unreachable_api_cannot_verify() {
    let (_dir, path) = known_hosts_path();
    seed(&path, "github.com ssh-ed25519 FALLBACK\nssh.github.com ssh-ed25519 FALLBACK\n");

    // The fallback table would match, but the verifier never uses it.
    let err = verify(&path, &unreachable()).unwrap_err();
    assert!(matches!(err, VerifyError::Fetch(ref e) if e.is_transport()));
    assert_eq!(verify_with_source(&path, &unreachable()), 1);
}

#[test]
fn test_malformed_response_cannot_verify() {
    let (_dir, path) = known_hosts_path();
    seed(&path, "github.com keyA\nssh.github.com keyA\n");
    assert_eq!(verify_with_source(&path, &responding("not json")), 1);
}
