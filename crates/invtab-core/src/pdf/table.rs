//! Table detection over reconstructed page lines.
//!
//! A table row is a line that splits into enough cells; a table is a
//! maximal run of such lines. The first row is the header.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Tabs, runs of two or more spaces, or a pipe with optional padding.
    static ref CELL_SEPARATOR: Regex = Regex::new(r"\s*\|\s*|\t+\s*|\s{2,}").unwrap();
}

/// A table as rows of cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn num_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get header row (first row).
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Get data rows (all rows except header).
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Split a line into trimmed, non-empty cells.
pub fn split_cells(line: &str) -> Vec<String> {
    CELL_SEPARATOR
        .split(line.trim())
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find all tables in page order.
///
/// A table starts at the first line with at least `min_columns` cells and
/// runs to the last such line before a blank line or the end of the page.
/// Narrower lines between two table rows (a wrapped description, a row
/// with a missing cell) stay in the table as short rows; narrower lines
/// after the last table row are page text, not table content.
pub fn detect_tables<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    min_columns: usize,
) -> Vec<Table> {
    let min_columns = min_columns.max(2);
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();
    let mut pending: Vec<Vec<String>> = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            pending.clear();
            if !current.is_empty() {
                tables.push(Table::new(std::mem::take(&mut current)));
            }
            continue;
        }

        let cells = split_cells(line);
        if cells.len() >= min_columns {
            current.append(&mut pending);
            current.push(cells);
        } else if !current.is_empty() {
            pending.push(cells);
        }
    }

    if !current.is_empty() {
        tables.push(Table::new(current));
    }

    tables
}
