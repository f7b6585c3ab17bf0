//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Site fixture creation utilities
//! - Snapshot assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! let site = fixtures::create_default_site()?;
//! // run the build against site.path()
//! ```

pub mod assertions;
pub mod fixtures;

use assert_cmd::Command;

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}

/// The sizesnap binary with CI detection cleared, so prompts read stdin
#[allow(dead_code)]
pub fn interactive_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sizesnap"));
    cmd.env_remove("CI").env_remove("GITHUB_ACTIONS");
    cmd
}

/// The sizesnap binary as a CI system would run it
#[allow(dead_code)]
pub fn ci_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sizesnap"));
    cmd.env_remove("GITHUB_ACTIONS").env("CI", "true");
    cmd
}
