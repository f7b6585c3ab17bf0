//! Bundle size snapshots
//!
//! A snapshot is the last accepted set of per-file sizes plus their total.
//! This module holds the data model; persistence, comparison, reporting and
//! the confirmation gate live in the submodules.

mod comparator;
mod gate;
mod reporter;
mod storage;

pub use comparator::{ChangeKind, FileDiff, FileStatus, SnapshotDiff};
pub use gate::{GateOutcome, SnapshotGate};
pub use reporter::SnapshotReporter;
pub use storage::{SnapshotError, SnapshotStorage};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Key under which the aggregate row is persisted
pub const TOTAL_KEY: &str = "total";

/// The three size metrics tracked for every file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Uncompressed byte length
    Raw,
    /// gzip-compressed length
    Gzip,
    /// brotli-compressed length
    Brotli,
}

impl Metric {
    /// All metrics in report order
    pub const ALL: [Metric; 3] = [Metric::Raw, Metric::Gzip, Metric::Brotli];

    /// Column label
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Raw => "raw",
            Metric::Gzip => "gzip",
            Metric::Brotli => "brotli",
        }
    }
}

/// Sizes of one file (or of the whole bundle)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRecord {
    /// Uncompressed bytes
    pub raw: u64,
    /// gzip-compressed bytes
    pub gzip: u64,
    /// brotli-compressed bytes
    pub brotli: u64,
}

impl SizeRecord {
    /// Value of a single metric
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Raw => self.raw,
            Metric::Gzip => self.gzip,
            Metric::Brotli => self.brotli,
        }
    }

    /// Difference `new - self` for every metric, saturating at the `i64` range
    pub fn delta_to(&self, new: &SizeRecord) -> SizeDelta {
        let diff = |old: u64, new: u64| {
            let delta = i128::from(new) - i128::from(old);
            i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
        };
        SizeDelta {
            raw: diff(self.raw, new.raw),
            gzip: diff(self.gzip, new.gzip),
            brotli: diff(self.brotli, new.brotli),
        }
    }
}

impl AddAssign for SizeRecord {
    fn add_assign(&mut self, other: Self) {
        self.raw += other.raw;
        self.gzip += other.gzip;
        self.brotli += other.brotli;
    }
}

/// Signed per-metric change between two records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeDelta {
    /// Change in uncompressed bytes
    pub raw: i64,
    /// Change in gzip bytes
    pub gzip: i64,
    /// Change in brotli bytes
    pub brotli: i64,
}

impl SizeDelta {
    /// Value of a single metric
    pub fn get(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Raw => self.raw,
            Metric::Gzip => self.gzip,
            Metric::Brotli => self.brotli,
        }
    }

    /// True when no metric changed
    pub fn is_zero(&self) -> bool {
        Metric::ALL.iter().all(|m| self.get(*m) == 0)
    }

    /// True when any metric grew
    pub fn has_increase(&self) -> bool {
        Metric::ALL.iter().any(|m| self.get(*m) > 0)
    }

    /// True when any metric shrank
    pub fn has_decrease(&self) -> bool {
        Metric::ALL.iter().any(|m| self.get(*m) < 0)
    }
}

/// Per-file sizes plus their aggregate
///
/// Persisted as one flat JSON object keyed by file name, with the aggregate
/// stored under [`TOTAL_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSnapshot {
    /// Sizes keyed by path relative to the dist root
    #[serde(flatten)]
    pub files: BTreeMap<String, SizeRecord>,
    /// Sum of every file record
    pub total: SizeRecord,
}

impl SizeSnapshot {
    /// Build a snapshot whose total is the sum of `files`
    pub fn from_files(files: BTreeMap<String, SizeRecord>) -> Self {
        let mut total = SizeRecord::default();
        for record in files.values() {
            total += *record;
        }
        Self { files, total }
    }
}
