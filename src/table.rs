//! Pipe tables.
//!
//! Row 0 is the header, row 1 the alignment divider, the rest are data
//! rows. A divider cell ending in `:` right-aligns its column in every row,
//! header included.

use smallvec::SmallVec;

use crate::limits::MAX_TABLE_COLUMNS;
use crate::render::HtmlWriter;

/// Cells of one row.
pub type Cells<'a> = SmallVec<[&'a str; 8]>;

/// A parsed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec<'a> {
    /// Header cells.
    pub header: Cells<'a>,
    /// Per-column right-alignment flags from the divider row.
    pub right_aligned: SmallVec<[bool; 8]>,
    /// Data rows.
    pub rows: Vec<Cells<'a>>,
}

impl<'a> TableSpec<'a> {
    /// Build a table from its source rows.
    ///
    /// Returns `None` unless there are at least two rows and row 1 is a
    /// valid divider.
    pub fn parse(lines: &[&'a str]) -> Option<Self> {
        let (header, rest) = lines.split_first()?;
        let (divider, data) = rest.split_first()?;
        if !is_divider_row(divider) {
            return None;
        }

        let right_aligned = split_cells(divider)
            .iter()
            .map(|cell| cell.ends_with(':'))
            .collect();

        Some(Self {
            header: split_cells(header),
            right_aligned,
            rows: data.iter().map(|row| split_cells(row)).collect(),
        })
    }

    /// Number of columns in the header.
    #[inline]
    pub fn columns(&self) -> usize {
        self.header.len()
    }

    #[inline]
    fn is_right_aligned(&self, column: usize) -> bool {
        self.right_aligned.get(column).copied().unwrap_or(false)
    }

    /// Render the table.
    pub fn render(&self, writer: &mut HtmlWriter) {
        writer.open_tag("table");
        self.render_row(writer, &self.header, "th");
        for row in &self.rows {
            self.render_row(writer, row, "td");
        }
        writer.newline();
        writer.close_tag("table");
    }

    fn render_row(&self, writer: &mut HtmlWriter, cells: &[&str], tag: &str) {
        writer.newline();
        writer.indent(1);
        writer.open_tag("tr");
        for (column, cell) in cells.iter().enumerate() {
            writer.newline();
            writer.indent(2);
            writer.open_tag_start(tag);
            if self.is_right_aligned(column) {
                writer.write_attr("style", "text-align:right");
            }
            writer.open_tag_end();
            writer.write_str(cell);
            writer.close_tag(tag);
        }
        writer.newline();
        writer.indent(1);
        writer.close_tag("tr");
    }
}

/// A table row starts and ends with a pipe.
#[inline]
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// A divider row has only `:?-+:?` cells.
pub fn is_divider_row(line: &str) -> bool {
    if !is_table_row(line) {
        return false;
    }
    let cells = split_cells(line);
    !cells.is_empty() && cells.iter().all(|cell| is_divider_cell(cell))
}

fn is_divider_cell(cell: &str) -> bool {
    let inner = cell.strip_prefix(':').unwrap_or(cell);
    let inner = inner.strip_suffix(':').unwrap_or(inner);
    !inner.is_empty() && inner.bytes().all(|b| b == b'-')
}

/// Split a row into trimmed cells, dropping the outer pipes.
pub fn split_cells(line: &str) -> Cells<'_> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner
        .split('|')
        .map(str::trim)
        .take(MAX_TABLE_COLUMNS)
        .collect()
}
