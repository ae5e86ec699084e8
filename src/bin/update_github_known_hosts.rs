//! Rewrites ~/.ssh/known_hosts with GitHub's current SSH host keys.

use clap::Parser;
use github_known_hosts::cli::{self, UpdateCli};

fn main() {
    let code = cli::run_update(UpdateCli::parse());
    if code != 0 {
        // No destructors pending at this point; exit with the tool's code.
        std::process::exit(code);
    }
}
