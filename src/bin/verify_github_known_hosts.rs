//! Checks ~/.ssh/known_hosts against GitHub's published SSH host keys.

use clap::Parser;
use github_known_hosts::cli::{self, VerifyCli};

fn main() {
    std::process::exit(cli::run_verify(VerifyCli::parse()));
}
