//! CLI interface tests
//!
//! Drives the sizesnap binary through the snapshot lifecycle: first run,
//! unchanged rerun, accepted and rejected changes, and CI runs.

use predicates::prelude::*;
use std::fs;

mod common;
use common::assertions::{assert_snapshot_files, assert_total_is_sum, read_snapshot_json};
use common::{ci_bin, fixtures, interactive_bin};

const DEFAULT_FILES: [&str; 4] = ["index.html", "index.js", "logo.svg", "styles.css"];

#[test]
fn test_cli_help_flag_displays_usage_information() {
    interactive_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bundle size snapshots"))
        .stdout(predicate::str::contains("--project-root"));
}

#[test]
fn test_cli_version_flag_displays_version_number() {
    interactive_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sizesnap"));
}

#[test]
fn test_first_run_declined_fails_without_snapshot() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");

    interactive_bin()
        .current_dir(site.path())
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No size snapshot found"))
        .stderr(predicate::str::contains("Build failed."))
        .stderr(predicate::str::contains("creating one was declined"));

    assert!(!site.path().join("size-snapshot.json").exists());
    // the build itself still ran
    assert!(site.path().join("dist/index.html").exists());
}

#[test]
fn test_first_run_accepted_writes_snapshot() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");

    interactive_bin()
        .arg("--project-root")
        .arg(site.path())
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot created"))
        .stdout(predicate::str::contains("Build completed."));

    let snapshot = read_snapshot_json(&site.path().join("size-snapshot.json"));
    assert_snapshot_files(&snapshot, &DEFAULT_FILES);
    assert_total_is_sum(&snapshot);
    assert_eq!(
        snapshot["index.js"]["raw"].as_u64(),
        Some(fixtures::INDEX_JS.len() as u64)
    );
}

#[test]
fn test_unchanged_rerun_succeeds_without_prompt() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    interactive_bin()
        .current_dir(site.path())
        .write_stdin("y\n")
        .assert()
        .success();
    let before = fs::read(site.path().join("size-snapshot.json")).unwrap();

    // no stdin at all: a prompt would read EOF and decline
    interactive_bin()
        .current_dir(site.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sizes unchanged"))
        .stdout(predicate::str::contains("[y/N]").not());

    assert_eq!(fs::read(site.path().join("size-snapshot.json")).unwrap(), before);
}

#[test]
fn test_growth_accepted_updates_snapshot() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    interactive_bin()
        .current_dir(site.path())
        .write_stdin("y\n")
        .assert()
        .success();
    fixtures::grow_asset(site.path(), "index.js", "console.log('more');\n").unwrap();

    interactive_bin()
        .current_dir(site.path())
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle size increased"))
        .stdout(predicate::str::contains("Snapshot updated"));

    let snapshot = read_snapshot_json(&site.path().join("size-snapshot.json"));
    assert_eq!(
        snapshot["index.js"]["raw"].as_u64(),
        Some((fixtures::INDEX_JS.len() + "console.log('more');\n".len()) as u64)
    );
    assert_total_is_sum(&snapshot);
}

#[test]
fn test_growth_declined_fails_and_keeps_snapshot() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    interactive_bin()
        .current_dir(site.path())
        .write_stdin("y\n")
        .assert()
        .success();
    let before = fs::read(site.path().join("size-snapshot.json")).unwrap();
    fixtures::grow_asset(site.path(), "styles.css", "h1 { color: red; }\n").unwrap();

    interactive_bin()
        .current_dir(site.path())
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Bundle size increased"));

    assert_eq!(fs::read(site.path().join("size-snapshot.json")).unwrap(), before);
}

#[test]
fn test_ci_change_is_declined_and_snapshot_unchanged() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    interactive_bin()
        .current_dir(site.path())
        .write_stdin("y\n")
        .assert()
        .success();
    let before = fs::read(site.path().join("size-snapshot.json")).unwrap();
    fixtures::grow_asset(site.path(), "index.js", "// grows\n").unwrap();

    // "y" on stdin is never read in CI
    ci_bin()
        .current_dir(site.path())
        .write_stdin("y\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Build failed."));

    assert_eq!(fs::read(site.path().join("size-snapshot.json")).unwrap(), before);
}

#[test]
fn test_ci_first_run_fails_without_baseline() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");

    ci_bin()
        .current_dir(site.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("help:"));

    assert!(!site.path().join("size-snapshot.json").exists());
}

#[test]
fn test_missing_asset_fails_with_io_exit_code() {
    let site = fixtures::create_site(&[("index.html", fixtures::INDEX_HTML)])
        .expect("Failed to create test fixture");

    interactive_bin()
        .current_dir(site.path())
        .assert()
        .code(74)
        .stderr(predicate::str::contains("Failed to copy"));
}

#[test]
fn test_invalid_config_fails_with_config_exit_code() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    fixtures::write_config(site.path(), "assets = []\n").unwrap();

    interactive_bin()
        .current_dir(site.path())
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_dist_over_src_is_rejected_before_anything_is_deleted() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    fixtures::write_config(
        site.path(),
        "dist-dir = \"src\"\n\n[[assets]]\nsource = \"index.js\"\ndestination = \"index.js\"\n",
    )
    .unwrap();

    interactive_bin()
        .current_dir(site.path())
        .write_stdin("y\n")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("overlaps"));

    assert!(site.path().join("src/index.js").exists());
}

#[test]
fn test_malformed_snapshot_fails_with_data_exit_code() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    fs::write(site.path().join("size-snapshot.json"), "{\"index.js\": 3}").unwrap();

    interactive_bin()
        .current_dir(site.path())
        .write_stdin("y\n")
        .assert()
        .code(65)
        .stderr(predicate::str::contains("malformed"));
}

#[test]
fn test_config_file_flag_selects_manifest() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    let config = site.path().join("custom.toml");
    fs::write(
        &config,
        r#"
dist-dir = "public"
snapshot = "sizes/snapshot.json"

[[assets]]
source = "index.js"
destination = "js/app.js"
"#,
    )
    .unwrap();

    interactive_bin()
        .current_dir(site.path())
        .arg("--config")
        .arg(&config)
        .write_stdin("y\n")
        .assert()
        .success();

    assert!(site.path().join("public/js/app.js").exists());
    let snapshot = read_snapshot_json(&site.path().join("sizes/snapshot.json"));
    assert_snapshot_files(&snapshot, &["js/app.js"]);
}
