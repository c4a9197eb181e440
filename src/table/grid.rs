//! Raw table grid
//!
//! Reference sources arrive as CSV exports of the WHO workbooks. They
//! routinely carry title rows, blank separator rows and ragged widths
//! before the real header, so the first reading pass makes no assumptions
//! at all: every row is kept as a plain vector of string cells and header
//! detection happens afterwards.

use std::path::Path;

use crate::error::Result;

/// A table file read as rows of untyped string cells
#[derive(Debug, Clone)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Read a CSV file into a grid without interpreting any row as a
    /// header. Ragged rows are accepted.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { rows })
    }

    /// Build a grid directly from rows of cells
    #[must_use]
    pub const fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// All rows in file order
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// One row by index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid holds no rows at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
