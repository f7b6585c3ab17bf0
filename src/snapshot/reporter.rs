//! Size and diff tables

use super::{FileStatus, Metric, SizeDelta, SizeRecord, SizeSnapshot, SnapshotDiff, TOTAL_KEY};
use crate::fmt::{format_bytes, format_delta};
use crate::table::{build_grid, render_grid, Grid, RenderOptions, TableError};
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Old,
    New,
    Diff,
}

impl Side {
    fn label(&self) -> &'static str {
        match self {
            Side::Old => "old",
            Side::New => "new",
            Side::Diff => "diff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DiffColumn {
    metric: Metric,
    side: Side,
}

enum RowLabel<'a> {
    File(&'a str, FileStatus),
    Total,
}

/// Renders snapshots and diffs as bordered tables
pub struct SnapshotReporter;

impl SnapshotReporter {
    /// Grid of per-file sizes followed by the total row
    pub fn size_grid(snapshot: &SizeSnapshot) -> Result<Grid, TableError> {
        let mut rows: Vec<(&str, Vec<(Metric, u64)>)> = snapshot
            .files
            .iter()
            .map(|(name, record)| (name.as_str(), metric_cells(record)))
            .collect();
        rows.push((TOTAL_KEY, metric_cells(&snapshot.total)));

        build_grid(
            &rows,
            |name| {
                if *name == TOTAL_KEY {
                    style(name).bold().to_string()
                } else {
                    name.to_string()
                }
            },
            |metric| metric.label().to_string(),
            |bytes| format_bytes(*bytes),
        )
    }

    /// Rendered size table
    pub fn size_table(snapshot: &SizeSnapshot) -> Result<String, TableError> {
        let grid = Self::size_grid(snapshot)?;
        Ok(render_grid(
            &grid,
            RenderOptions {
                rule_before_last: true,
            },
        ))
    }

    /// Grid of removed, added and changed files followed by the total row
    ///
    /// Each metric contributes an old, a new and a diff column.
    pub fn diff_grid(diff: &SnapshotDiff) -> Result<Grid, TableError> {
        let mut rows: Vec<(RowLabel<'_>, Vec<(DiffColumn, (Side, i64))>)> = diff
            .rows()
            .map(|row| {
                (
                    RowLabel::File(&row.name, row.status),
                    diff_cells(&row.old, &row.new, &row.delta()),
                )
            })
            .collect();
        rows.push((
            RowLabel::Total,
            diff_cells(&diff.old_total, &diff.new_total, &diff.total_delta()),
        ));

        build_grid(
            &rows,
            |label| match label {
                RowLabel::File(name, FileStatus::Removed) => {
                    style(format!("- {}", name)).red().to_string()
                }
                RowLabel::File(name, FileStatus::Added) => {
                    style(format!("+ {}", name)).green().to_string()
                }
                RowLabel::File(name, FileStatus::Changed) => name.to_string(),
                RowLabel::Total => style(TOTAL_KEY).bold().to_string(),
            },
            |column| format!("{} {}", column.metric.label(), column.side.label()),
            |(side, value)| match side {
                Side::Old | Side::New => format_bytes(value.unsigned_abs()),
                Side::Diff => colored_delta(*value),
            },
        )
    }

    /// Rendered diff table
    pub fn diff_table(diff: &SnapshotDiff) -> Result<String, TableError> {
        let grid = Self::diff_grid(diff)?;
        Ok(render_grid(
            &grid,
            RenderOptions {
                rule_before_last: true,
            },
        ))
    }
}

fn metric_cells(record: &SizeRecord) -> Vec<(Metric, u64)> {
    Metric::ALL
        .iter()
        .map(|metric| (*metric, record.get(*metric)))
        .collect()
}

fn diff_cells(
    old: &SizeRecord,
    new: &SizeRecord,
    delta: &SizeDelta,
) -> Vec<(DiffColumn, (Side, i64))> {
    let mut cells = Vec::with_capacity(Metric::ALL.len() * 3);
    for metric in Metric::ALL {
        let column = |side| DiffColumn { metric, side };
        cells.push((column(Side::Old), (Side::Old, size_cell(old.get(metric)))));
        cells.push((column(Side::New), (Side::New, size_cell(new.get(metric)))));
        cells.push((column(Side::Diff), (Side::Diff, delta.get(metric))));
    }
    cells
}

fn size_cell(bytes: u64) -> i64 {
    i64::try_from(bytes).unwrap_or(i64::MAX)
}

fn colored_delta(delta: i64) -> String {
    let text = format_delta(delta);
    match delta.signum() {
        1 => style(text).red().to_string(),
        -1 => style(text).green().to_string(),
        _ => style(text).dim().to_string(),
    }
}
