//! Tabular report rendering
//!
//! Rendering happens in two steps. [`build_grid`] turns keyed rows into a
//! grid of strings using caller-supplied label and cell transforms; it holds
//! every bit of data logic. [`render_grid`] only draws borders and pads
//! columns, so tests can check grids without caring about presentation.

use console::{measure_text_width, pad_str, Alignment};
use thiserror::Error;

/// A grid of rendered cells; the first row is the header row
pub type Grid = Vec<Vec<String>>;

/// Errors raised while building a grid
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// A row does not carry the same columns as the first row
    #[error("row '{row}' has columns [{found}], expected [{expected}]")]
    ColumnMismatch {
        /// Label of the offending row
        row: String,
        /// Column labels of the first row
        expected: String,
        /// Column labels of the offending row
        found: String,
    },
}

/// Build a grid from keyed rows.
///
/// The header row is a blank corner cell followed by the column labels of the
/// first row, in that row's order. Every later row must carry the same set of
/// columns; cells are emitted in header order whatever order a row lists them.
///
/// ```
/// use sizesnap::table::build_grid;
///
/// let rows = vec![
///     ("a.js", vec![("raw", 10u64), ("gzip", 4)]),
///     ("b.js", vec![("gzip", 2), ("raw", 7)]),
/// ];
/// let grid = build_grid(&rows, |r| r.to_string(), |c| c.to_string(), |v| v.to_string())?;
///
/// assert_eq!(grid[0], vec!["", "raw", "gzip"]);
/// assert_eq!(grid[2], vec!["b.js", "7", "2"]);
/// # Ok::<(), sizesnap::table::TableError>(())
/// ```
pub fn build_grid<R, C, V>(
    rows: &[(R, Vec<(C, V)>)],
    row_label: impl Fn(&R) -> String,
    col_label: impl Fn(&C) -> String,
    cell: impl Fn(&V) -> String,
) -> Result<Grid, TableError>
where
    C: PartialEq,
{
    let Some((_, first_cells)) = rows.first() else {
        return Ok(vec![vec![String::new()]]);
    };
    let columns: Vec<&C> = first_cells.iter().map(|(col, _)| col).collect();

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(String::new());
    header.extend(columns.iter().map(|col| col_label(col)));

    let mut grid = Vec::with_capacity(rows.len() + 1);
    grid.push(header);

    for (key, cells) in rows {
        let mismatch = || TableError::ColumnMismatch {
            row: row_label(key),
            expected: columns
                .iter()
                .map(|col| col_label(col))
                .collect::<Vec<_>>()
                .join(", "),
            found: cells
                .iter()
                .map(|(col, _)| col_label(col))
                .collect::<Vec<_>>()
                .join(", "),
        };

        if cells.len() != columns.len() {
            return Err(mismatch());
        }

        let mut line = Vec::with_capacity(columns.len() + 1);
        line.push(row_label(key));
        for col in &columns {
            let (_, value) = cells
                .iter()
                .find(|(candidate, _)| candidate == *col)
                .ok_or_else(mismatch)?;
            line.push(cell(value));
        }
        grid.push(line);
    }

    Ok(grid)
}

/// Options for [`render_grid`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Draw a rule above the last row (used for totals)
    pub rule_before_last: bool,
}

/// Draw a grid as a bordered text table.
///
/// The first column is left-aligned, every other column right-aligned. Cell
/// widths are measured on visible characters, so styled cells line up.
pub fn render_grid(grid: &Grid, options: RenderOptions) -> String {
    let column_count = grid.iter().map(Vec::len).max().unwrap_or(0);
    if column_count == 0 {
        return String::new();
    }

    let mut widths = vec![0usize; column_count];
    for row in grid {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };

    let mut out = rule("┌", "┬", "┐");
    let last = grid.len().saturating_sub(1);

    for (index, row) in grid.iter().enumerate() {
        if index == last && index > 1 && options.rule_before_last {
            out.push_str(&rule("├", "┼", "┤"));
        }

        out.push('│');
        for (i, width) in widths.iter().enumerate() {
            let text = row.get(i).map(String::as_str).unwrap_or("");
            let align = if i == 0 {
                Alignment::Left
            } else {
                Alignment::Right
            };
            out.push(' ');
            out.push_str(&pad_str(text, *width, align, None));
            out.push_str(" │");
        }
        out.push('\n');

        if index == 0 && grid.len() > 1 {
            out.push_str(&rule("├", "┼", "┤"));
        }
    }

    out.push_str(&rule("└", "┴", "┘"));
    out
}
