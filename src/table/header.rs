//! Header row detection for WHO table exports
//!
//! This module finds the real header row inside a raw grid and indexes
//! its column names. Detection works the same way across all source
//! layouts: a row is the header when its trimmed cell values contain one
//! of the known column-name sets in full.

use std::collections::HashSet;

use log::debug;
use rustc_hash::FxHashMap;

use super::grid::RawGrid;

/// Age column shared by every source layout
pub const AGE_COLUMN: &str = "Month";

/// Characteristic columns of a sheet carrying LMS parameters
pub const LMS_COLUMNS: [&str; 4] = ["Month", "L", "M", "S"];

/// Characteristic columns of a 5-19 z-score sheet
pub const Z_SCORE_COLUMNS: [&str; 8] = [
    "Month", "-3 SD", "-2 SD", "-1 SD", "Median", "1 SD", "2 SD", "3 SD",
];

/// Characteristic columns of a 5-19 percentile sheet
pub const PERCENTILE_COLUMNS: [&str; 12] = [
    "Month", "1st", "3rd", "5th", "15th", "25th", "50th", "75th", "85th", "95th", "97th", "99th",
];

/// Find the header row within the scan window.
///
/// The first row whose trimmed cells are a superset of one of the known
/// column sets wins. When no row matches, row 0 is assumed to be the
/// header, matching the behavior of a clean export without leading
/// metadata.
#[must_use]
pub fn detect_header_row(grid: &RawGrid, scan_limit: usize) -> usize {
    let max_scan = scan_limit.min(grid.len());
    for (i, row) in grid.rows().iter().enumerate().take(max_scan) {
        let cells: HashSet<&str> = row.iter().map(|c| c.trim()).collect();
        if contains_all(&cells, &LMS_COLUMNS)
            || contains_all(&cells, &Z_SCORE_COLUMNS)
            || contains_all(&cells, &PERCENTILE_COLUMNS)
        {
            debug!("Detected header at row {i}");
            return i;
        }
    }

    debug!("No header row recognized within the first {max_scan} rows, assuming row 0");
    0
}

fn contains_all(cells: &HashSet<&str>, required: &[&str]) -> bool {
    required.iter().all(|name| cells.contains(name))
}

/// Column-name index over a detected header row
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    columns: FxHashMap<String, usize>,
}

impl HeaderIndex {
    /// Index a header row by trimmed column name. The first occurrence
    /// of a duplicated name wins.
    #[must_use]
    pub fn from_row(cells: &[String]) -> Self {
        let mut columns = FxHashMap::default();
        for (i, cell) in cells.iter().enumerate() {
            let name = cell.trim();
            if !name.is_empty() {
                columns.entry(name.to_string()).or_insert(i);
            }
        }
        Self { columns }
    }

    /// Position of a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Names from `required` that are absent from the header
    #[must_use]
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|name| !self.columns.contains_key(**name))
            .copied()
            .collect()
    }
}
