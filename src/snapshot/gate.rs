//! Snapshot confirmation gate
//!
//! Compares a fresh measurement against the stored snapshot and only lets
//! the snapshot move when the operator says so.

use super::{ChangeKind, SizeRecord, SizeSnapshot, SnapshotDiff, SnapshotReporter, SnapshotStorage};
use crate::error::BuildError;
use crate::fmt::{format_bytes, CAMERA, CHART, WARNING};
use crate::infra::FileSystem;
use crate::prompt::Prompter;
use anyhow::{Context, Result};
use console::style;

const CREATE_QUESTION: &str = "Create a size snapshot from this build?";
const ACCEPT_QUESTION: &str = "Accept the new sizes as the snapshot?";

/// What the gate did with the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// No snapshot existed; the current sizes were saved
    Created,
    /// Sizes match the snapshot; nothing was written
    Unchanged {
        /// Stable total
        total: SizeRecord,
    },
    /// Sizes moved and the operator accepted them
    Accepted {
        /// Direction of the accepted change
        kind: ChangeKind,
    },
}

/// Guards the snapshot file behind a confirmation prompt
pub struct SnapshotGate<'a, FS: FileSystem, P: Prompter> {
    storage: &'a SnapshotStorage<FS>,
    prompter: &'a P,
}

impl<'a, FS: FileSystem, P: Prompter> SnapshotGate<'a, FS, P> {
    /// Create a gate over `storage` asking through `prompter`
    pub fn new(storage: &'a SnapshotStorage<FS>, prompter: &'a P) -> Self {
        Self { storage, prompter }
    }

    /// Check `current` against the stored snapshot.
    ///
    /// Any difference, growth or shrinkage, needs a yes before the file is
    /// replaced. A no, or no answer at all, fails with a [`BuildError`] and
    /// leaves the file as it was.
    pub fn check(&self, current: &SizeSnapshot) -> Result<GateOutcome> {
        let Some(previous) = self.storage.load().map_err(BuildError::from)? else {
            return self.create(current);
        };

        let diff = SnapshotDiff::between(&previous, current);
        let kind = diff.kind();
        if kind == ChangeKind::NoChange {
            println!(
                "{} Sizes unchanged: {} raw, {} gzip, {} brotli",
                CHART,
                format_bytes(current.total.raw),
                format_bytes(current.total.gzip),
                format_bytes(current.total.brotli)
            );
            return Ok(GateOutcome::Unchanged {
                total: current.total,
            });
        }

        let table = SnapshotReporter::diff_table(&diff).context("Failed to render size diff")?;
        let headline = match kind {
            ChangeKind::Increase => style("Bundle size increased").red().bold(),
            _ => style("Bundle size decreased").green().bold(),
        };
        println!("\n{} {}\n{}", WARNING, headline, table);

        let answer = self.prompter.confirm(ACCEPT_QUESTION)?;
        if !answer.is_yes() {
            log::warn!("Size change {} not accepted ({:?})", kind, answer);
            return Err(BuildError::SizeChangeRejected {
                kind,
                snapshot_path: self.storage.path().to_path_buf(),
            }
            .into());
        }

        self.storage.save(current).map_err(BuildError::from)?;
        println!("{} Snapshot updated", CAMERA);
        Ok(GateOutcome::Accepted { kind })
    }

    fn create(&self, current: &SizeSnapshot) -> Result<GateOutcome> {
        println!(
            "{} No size snapshot found at {}",
            WARNING,
            self.storage.path().display()
        );

        let answer = self.prompter.confirm(CREATE_QUESTION)?;
        if !answer.is_yes() {
            log::warn!("Snapshot creation not accepted ({:?})", answer);
            return Err(BuildError::NoBaseline {
                snapshot_path: self.storage.path().to_path_buf(),
            }
            .into());
        }

        self.storage.save(current).map_err(BuildError::from)?;
        println!("{} Snapshot created", CAMERA);
        Ok(GateOutcome::Created)
    }
}
