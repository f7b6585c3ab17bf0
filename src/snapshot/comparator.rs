//! Snapshot comparison logic

use super::{SizeDelta, SizeRecord, SizeSnapshot};
use std::fmt;

/// Overall direction of a size change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Every file and metric is identical
    NoChange,
    /// Something shrank or was removed, nothing grew
    Decrease,
    /// Something grew or was added
    Increase,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ChangeKind::NoChange => "unchanged",
            ChangeKind::Decrease => "decreased",
            ChangeKind::Increase => "increased",
        };
        f.write_str(text)
    }
}

/// How a file differs between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Present only in the previous snapshot
    Removed,
    /// Present only in the current snapshot
    Added,
    /// Present in both with different sizes
    Changed,
}

/// One row of a snapshot diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// File name relative to the dist root
    pub name: String,
    /// Kind of difference
    pub status: FileStatus,
    /// Previous sizes (zero for added files)
    pub old: SizeRecord,
    /// Current sizes (zero for removed files)
    pub new: SizeRecord,
}

impl FileDiff {
    /// Signed change `new - old`
    pub fn delta(&self) -> SizeDelta {
        self.old.delta_to(&self.new)
    }
}

/// Differences between a previous and a current snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Files that disappeared, sorted by name
    pub removed: Vec<FileDiff>,
    /// Files that appeared, sorted by name
    pub added: Vec<FileDiff>,
    /// Files whose sizes moved, sorted by name
    pub changed: Vec<FileDiff>,
    /// Previous aggregate
    pub old_total: SizeRecord,
    /// Current aggregate
    pub new_total: SizeRecord,
}

impl SnapshotDiff {
    /// Compare `current` against `previous`
    pub fn between(previous: &SizeSnapshot, current: &SizeSnapshot) -> Self {
        let removed = previous
            .files
            .iter()
            .filter(|(name, _)| !current.files.contains_key(*name))
            .map(|(name, old)| FileDiff {
                name: name.clone(),
                status: FileStatus::Removed,
                old: *old,
                new: SizeRecord::default(),
            })
            .collect();

        let mut added = Vec::new();
        let mut changed = Vec::new();
        for (name, new) in &current.files {
            match previous.files.get(name) {
                None => added.push(FileDiff {
                    name: name.clone(),
                    status: FileStatus::Added,
                    old: SizeRecord::default(),
                    new: *new,
                }),
                Some(old) if old != new => changed.push(FileDiff {
                    name: name.clone(),
                    status: FileStatus::Changed,
                    old: *old,
                    new: *new,
                }),
                Some(_) => {}
            }
        }

        Self {
            removed,
            added,
            changed,
            old_total: previous.total,
            new_total: current.total,
        }
    }

    /// Rows in report order: removed, added, changed
    pub fn rows(&self) -> impl Iterator<Item = &FileDiff> {
        self.removed
            .iter()
            .chain(self.added.iter())
            .chain(self.changed.iter())
    }

    /// Signed change of the aggregate
    pub fn total_delta(&self) -> SizeDelta {
        self.old_total.delta_to(&self.new_total)
    }

    /// True when nothing differs
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }

    /// A file was added or any metric of a changed file grew
    pub fn has_increase(&self) -> bool {
        !self.added.is_empty() || self.changed.iter().any(|d| d.delta().has_increase())
    }

    /// A file was removed or any metric of a changed file shrank
    pub fn has_decrease(&self) -> bool {
        !self.removed.is_empty() || self.changed.iter().any(|d| d.delta().has_decrease())
    }

    /// Overall direction; growth anywhere wins over shrinkage elsewhere
    pub fn kind(&self) -> ChangeKind {
        if self.has_increase() {
            ChangeKind::Increase
        } else if self.has_decrease() {
            ChangeKind::Decrease
        } else {
            ChangeKind::NoChange
        }
    }
}
