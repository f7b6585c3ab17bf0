//! End-to-end workflow tests through the library API
//!
//! Uses `FixedPrompter` in place of the terminal so every branch of the
//! snapshot gate can be driven without stdin.

use sizesnap::cmd::BuildWorkflow;
use sizesnap::config::{ConfigFile, ConfigLoader};
use sizesnap::error::BuildError;
use sizesnap::pipeline::CopyOutcome;
use sizesnap::prompt::{Answer, FixedPrompter};
use sizesnap::snapshot::{ChangeKind, GateOutcome};
use std::fs;

mod common;
use common::assertions::{assert_total_is_sum, read_snapshot_json};
use common::fixtures;

fn workflow(site: &tempfile::TempDir) -> BuildWorkflow {
    let config = ConfigLoader::load(site.path()).expect("Failed to load config");
    BuildWorkflow::new(site.path(), config)
}

fn accept_first_build(workflow: &BuildWorkflow) {
    let result = workflow.build().expect("Build failed");
    let outcome = workflow
        .guard_snapshot(&result.sizes, &FixedPrompter::new(Answer::Yes))
        .expect("Snapshot gate failed");
    assert_eq!(outcome, GateOutcome::Created);
}

#[test]
fn test_default_manifest_lands_in_dist_unchanged() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");

    let result = workflow(&site).build().expect("Build failed");

    assert_eq!(result.copies.len(), 4);
    for (name, content) in [
        ("index.html", fixtures::INDEX_HTML),
        ("index.js", fixtures::INDEX_JS),
        ("styles.css", fixtures::STYLES_CSS),
        ("logo.svg", fixtures::LOGO_SVG),
    ] {
        assert_eq!(
            fs::read_to_string(site.path().join("dist").join(name)).unwrap(),
            content
        );
    }
}

#[test]
fn test_stale_dist_content_is_cleared() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    fs::create_dir_all(site.path().join("dist/old")).unwrap();
    fs::write(site.path().join("dist/old/chunk.js"), "stale").unwrap();

    let result = workflow(&site).build().expect("Build failed");

    assert!(!site.path().join("dist/old").exists());
    assert!(!result.sizes.files.contains_key("old/chunk.js"));
}

#[test]
fn test_two_identical_builds_report_no_change() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    let workflow = workflow(&site);
    accept_first_build(&workflow);

    let prompter = FixedPrompter::new(Answer::No);
    let result = workflow.build().expect("Build failed");
    let outcome = workflow
        .guard_snapshot(&result.sizes, &prompter)
        .expect("Unchanged sizes should pass");

    assert_eq!(
        outcome,
        GateOutcome::Unchanged {
            total: result.sizes.total
        }
    );
    assert!(prompter.questions().is_empty());
}

#[test]
fn test_removed_asset_is_a_decrease_needing_confirmation() {
    let site = fixtures::create_default_site().expect("Failed to create test fixture");
    accept_first_build(&workflow(&site));

    fixtures::write_config(
        site.path(),
        r#"
[[assets]]
source = "index.html"
destination = "index.html"

[[assets]]
source = "index.js"
destination = "index.js"
"#,
    )
    .unwrap();
    let workflow = workflow(&site);
    let before = fs::read(workflow.snapshot_path()).unwrap();
    let result = workflow.build().expect("Build failed");

    let err = workflow
        .guard_snapshot(&result.sizes, &FixedPrompter::new(Answer::No))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::SizeChangeRejected {
            kind: ChangeKind::Decrease,
            ..
        })
    ));
    assert_eq!(fs::read(workflow.snapshot_path()).unwrap(), before);

    let outcome = workflow
        .guard_snapshot(&result.sizes, &FixedPrompter::new(Answer::Yes))
        .expect("Accepted change should pass");
    assert_eq!(
        outcome,
        GateOutcome::Accepted {
            kind: ChangeKind::Decrease
        }
    );
    let snapshot = read_snapshot_json(&workflow.snapshot_path());
    assert!(snapshot.get("styles.css").is_none());
    assert_total_is_sum(&snapshot);
}

#[test]
fn test_markup_issues_do_not_block_the_build() {
    let site = fixtures::create_site(&[("index.html", "<html><body><p>hi</body></html>")])
        .expect("Failed to create test fixture");
    let config = ConfigFile {
        assets: vec![sizesnap::config::AssetEntry::same_name("index.html")],
        ..ConfigFile::default()
    };

    let result = BuildWorkflow::new(site.path(), config)
        .build()
        .expect("Build failed");

    match &result.copies[0] {
        CopyOutcome::Copied { markup_issues, .. } => assert!(markup_issues.len() >= 2),
        other => panic!("expected a copy, got {:?}", other),
    }
    assert!(result.sizes.files.contains_key("index.html"));
}

#[test]
fn test_disabled_markup_check_reports_nothing() {
    let site = fixtures::create_site(&[("index.html", "<div>")])
        .expect("Failed to create test fixture");
    let config = ConfigFile {
        validate_markup: false,
        assets: vec![sizesnap::config::AssetEntry::same_name("index.html")],
        ..ConfigFile::default()
    };

    let result = BuildWorkflow::new(site.path(), config)
        .build()
        .expect("Build failed");

    assert!(matches!(
        &result.copies[0],
        CopyOutcome::Copied { markup_issues, .. } if markup_issues.is_empty()
    ));
}
