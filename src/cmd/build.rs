//! Build command implementation
//!
//! Thin presentation layer for the build command.
//! Business logic lives in `workflow::BuildWorkflow`.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::cmd::workflow::BuildWorkflow;
use crate::config::ConfigLoader;
use crate::fmt::{format_bytes, CHART, CHECKMARK, ROCKET, WARNING};
use crate::pipeline::CopyOutcome;
use crate::prompt::TerminalPrompter;
use crate::snapshot::{GateOutcome, SizeSnapshot, SnapshotReporter};

/// Main build command handler (presentation layer)
///
/// Loads the configuration (from `config_path`, or `sizesnap.toml` under
/// `project_root`), runs the build and gates the snapshot through the
/// terminal prompter.
///
/// # Examples
///
/// ```no_run
/// use sizesnap::cmd::build::cmd_build;
/// use std::path::Path;
///
/// cmd_build(Path::new("."), None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_build(project_root: &Path, config_path: Option<&Path>) -> Result<()> {
    println!("{} {} Static Build", ROCKET, style("sizesnap").bold());
    println!();

    let config = match config_path {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load(project_root)?,
    };
    let workflow = BuildWorkflow::new(project_root, config);

    let result = workflow.build()?;
    present_copies(&result.copies);
    present_sizes(&result.sizes)?;

    let outcome = workflow.guard_snapshot(&result.sizes, &TerminalPrompter::from_env())?;
    present_outcome(&outcome);

    println!("{} Build completed.", CHECKMARK);
    Ok(())
}

/// Present per-asset copy results and markup findings
fn present_copies(copies: &[CopyOutcome]) {
    for copy in copies {
        match copy {
            CopyOutcome::Copied {
                destination,
                bytes,
                markup_issues,
            } => {
                println!(
                    "   {} {} ({})",
                    style("•").dim(),
                    destination.display(),
                    format_bytes(*bytes)
                );
                for issue in markup_issues {
                    println!("     {} {}", WARNING, style(issue).yellow());
                }
            }
            CopyOutcome::Skipped {
                destination,
                reason,
            } => {
                println!(
                    "   {} {} skipped: {}",
                    WARNING,
                    style(destination.display()).yellow(),
                    reason
                );
            }
        }
    }
    println!();
}

/// Present the size table
fn present_sizes(sizes: &SizeSnapshot) -> Result<()> {
    let table = SnapshotReporter::size_table(sizes).context("Failed to render size table")?;
    println!("{} Bundle sizes", CHART);
    println!("{}", table);
    Ok(())
}

/// Present what happened to the snapshot
fn present_outcome(outcome: &GateOutcome) {
    match outcome {
        GateOutcome::Created => println!("   Baseline recorded"),
        GateOutcome::Unchanged { total } => println!(
            "   Total: {}",
            style(format_bytes(total.raw)).green().bold()
        ),
        GateOutcome::Accepted { kind } => println!("   Accepted {} sizes", kind),
    }
    println!();
}
