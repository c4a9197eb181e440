//! Section parse paths
//!
//! Every source file is parsed as up to two sections: the LMS triplet
//! plus one band group, each with its own required columns. A section
//! whose columns are absent is skipped and reported as an omission so a
//! file missing a section still contributes what it has. Rows missing a
//! required value are dropped and counted.
//!
//! The one condition that is never skipped over is a zero or negative
//! `M` or `S`: such a row would later divide by zero in the z-score
//! transform, so it fails the whole parse.

use std::fmt;

use super::grid::RawGrid;
use super::header::{AGE_COLUMN, HeaderIndex};
use crate::error::{GrowthRefError, Result};
use crate::models::reference::{Lms, PercentileBands, ZScoreBands};

/// LMS parameter columns, shared by every layout that carries them
const LMS_VALUE_COLUMNS: [&str; 3] = ["L", "M", "S"];

/// Z-score band columns in the 0-5 exports
const Z_BAND_COLUMNS_0_5: [&str; 7] = ["SD3neg", "SD2neg", "SD1neg", "SD0", "SD1", "SD2", "SD3"];

/// Z-score band columns in the 5-19 exports
const Z_BAND_COLUMNS_5_19: [&str; 7] = ["-3 SD", "-2 SD", "-1 SD", "Median", "1 SD", "2 SD", "3 SD"];

/// Percentile columns in the 0-5 exports
const PERCENTILE_COLUMNS_0_5: [&str; 15] = [
    "P01", "P1", "P3", "P5", "P10", "P15", "P25", "P50", "P75", "P85", "P90", "P95", "P97", "P99",
    "P999",
];

/// Percentile columns in the 5-19 exports
const PERCENTILE_COLUMNS_5_19: [&str; 11] = [
    "1st", "3rd", "5th", "15th", "25th", "50th", "75th", "85th", "95th", "97th", "99th",
];

/// Column labeling convention for z-score bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZBandConvention {
    /// `SD3neg ... SD3` labels, used by the 0-5 exports
    Ages0To5,
    /// `-3 SD ... 3 SD` labels, used by the 5-19 exports
    Ages5To19,
}

impl ZBandConvention {
    const fn columns(self) -> [&'static str; 7] {
        match self {
            Self::Ages0To5 => Z_BAND_COLUMNS_0_5,
            Self::Ages5To19 => Z_BAND_COLUMNS_5_19,
        }
    }
}

/// Column labeling convention for percentile bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentileConvention {
    /// `P01 ... P999` labels, used by the 0-5 exports
    Ages0To5,
    /// Ordinal labels `1st ... 99th`, used by the 5-19 exports
    Ages5To19,
}

impl PercentileConvention {
    const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Ages0To5 => &PERCENTILE_COLUMNS_0_5,
            Self::Ages5To19 => &PERCENTILE_COLUMNS_5_19,
        }
    }
}

/// The section of a source file a parse path targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// LMS parameter triplet
    Lms,
    /// Precomputed z-score bands
    ZScoreBands,
    /// Precomputed percentile bands
    Percentiles,
}

impl Section {
    /// Stable label used in reports and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lms => "LMS",
            Self::ZScoreBands => "Z_SCORE_BANDS",
            Self::Percentiles => "PERCENTILES",
        }
    }
}

/// Record of a parse path that was skipped rather than failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    /// Section the skipped path would have produced
    pub section: Section,
    /// Why the path was skipped
    pub reason: String,
}

impl Omission {
    /// Create an omission record
    #[must_use]
    pub const fn new(section: Section, reason: String) -> Self {
        Self { section, reason }
    }
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} section skipped: {}", self.section.as_str(), self.reason)
    }
}

/// Outcome of one section parse path
#[derive(Debug)]
pub(crate) enum SectionParse<T> {
    /// The path ran; rows that failed the row filter were dropped
    Rows { rows: Vec<(u32, T)>, dropped: usize },
    /// The path was skipped because its columns are absent
    Skipped(Omission),
}

/// Parse the LMS section.
///
/// # Errors
/// Returns `TableFormatError` when a row carries a non-positive `M` or
/// `S`, which must never reach the store.
pub(crate) fn parse_lms(
    grid: &RawGrid,
    header_row: usize,
    header: &HeaderIndex,
) -> Result<SectionParse<Lms>> {
    let Some((age_col, cols)) = resolve_columns(header, &LMS_VALUE_COLUMNS) else {
        return Ok(SectionParse::Skipped(missing_columns(
            Section::Lms,
            header,
            &LMS_VALUE_COLUMNS,
        )));
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for row in body_rows(grid, header_row) {
        let Some(age) = parse_age(row, age_col) else {
            dropped += 1;
            continue;
        };
        let Some(values) = parse_row_values(row, &cols) else {
            dropped += 1;
            continue;
        };
        let lms = match Lms::new(values[0], values[1], values[2]) {
            Ok(lms) => lms,
            Err(GrowthRefError::TableFormatError(msg)) => {
                return Err(GrowthRefError::TableFormatError(format!(
                    "age {age}: {msg}"
                )));
            }
            Err(e) => return Err(e),
        };
        rows.push((age, lms));
    }

    Ok(SectionParse::Rows { rows, dropped })
}

/// Parse the z-score band section under the given labeling convention.
pub(crate) fn parse_z_bands(
    grid: &RawGrid,
    header_row: usize,
    header: &HeaderIndex,
    convention: ZBandConvention,
) -> SectionParse<ZScoreBands> {
    let names = convention.columns();
    let Some((age_col, cols)) = resolve_columns(header, &names) else {
        return SectionParse::Skipped(missing_columns(Section::ZScoreBands, header, &names));
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for row in body_rows(grid, header_row) {
        let Some(age) = parse_age(row, age_col) else {
            dropped += 1;
            continue;
        };
        let Some(v) = parse_row_values(row, &cols) else {
            dropped += 1;
            continue;
        };
        rows.push((
            age,
            ZScoreBands {
                sd_m3: v[0],
                sd_m2: v[1],
                sd_m1: v[2],
                median: v[3],
                sd_p1: v[4],
                sd_p2: v[5],
                sd_p3: v[6],
            },
        ));
    }

    SectionParse::Rows { rows, dropped }
}

/// Parse the percentile band section under the given labeling convention.
pub(crate) fn parse_percentiles(
    grid: &RawGrid,
    header_row: usize,
    header: &HeaderIndex,
    convention: PercentileConvention,
) -> SectionParse<PercentileBands> {
    let names = convention.columns();
    let Some((age_col, cols)) = resolve_columns(header, names) else {
        return SectionParse::Skipped(missing_columns(Section::Percentiles, header, names));
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for row in body_rows(grid, header_row) {
        let Some(age) = parse_age(row, age_col) else {
            dropped += 1;
            continue;
        };
        let Some(v) = parse_row_values(row, &cols) else {
            dropped += 1;
            continue;
        };
        let bands = match convention {
            PercentileConvention::Ages0To5 => PercentileBands {
                p01: Some(v[0]),
                p1: v[1],
                p3: v[2],
                p5: v[3],
                p10: Some(v[4]),
                p15: v[5],
                p25: v[6],
                p50: v[7],
                p75: v[8],
                p85: v[9],
                p90: Some(v[10]),
                p95: v[11],
                p97: v[12],
                p99: v[13],
                p999: Some(v[14]),
            },
            PercentileConvention::Ages5To19 => PercentileBands {
                p01: None,
                p1: v[0],
                p3: v[1],
                p5: v[2],
                p10: None,
                p15: v[3],
                p25: v[4],
                p50: v[5],
                p75: v[6],
                p85: v[7],
                p90: None,
                p95: v[8],
                p97: v[9],
                p99: v[10],
                p999: None,
            },
        };
        rows.push((age, bands));
    }

    SectionParse::Rows { rows, dropped }
}

/// Rows below the header, or nothing when the header is the last row
fn body_rows(grid: &RawGrid, header_row: usize) -> impl Iterator<Item = &Vec<String>> {
    grid.rows().iter().skip(header_row + 1)
}

/// Resolve the age column plus the section's value columns, `None` when
/// any of them is absent
fn resolve_columns(header: &HeaderIndex, names: &[&str]) -> Option<(usize, Vec<usize>)> {
    let age_col = header.column(AGE_COLUMN)?;
    let cols = names
        .iter()
        .map(|name| header.column(name))
        .collect::<Option<Vec<_>>>()?;
    Some((age_col, cols))
}

/// Build the omission describing which required columns are absent
fn missing_columns(section: Section, header: &HeaderIndex, names: &[&str]) -> Omission {
    let mut required = Vec::with_capacity(names.len() + 1);
    required.push(AGE_COLUMN);
    required.extend_from_slice(names);
    let missing = header.missing(&required);
    Omission::new(
        section,
        format!("missing required columns: {}", missing.join(", ")),
    )
}

/// Age cell to completed months: fractional values truncate, negative
/// or unparseable values drop the row
fn parse_age(row: &[String], col: usize) -> Option<u32> {
    let value = parse_numeric(row, col)?;
    if value < 0.0 {
        return None;
    }
    Some(value.trunc() as u32)
}

/// One numeric cell, `None` for absent, empty or non-finite values
fn parse_numeric(row: &[String], col: usize) -> Option<f64> {
    let cell = row.get(col)?.trim();
    if cell.is_empty() {
        return None;
    }
    let value: f64 = cell.parse().ok()?;
    value.is_finite().then_some(value)
}

/// All of a row's values for the resolved columns, `None` when any is
/// missing
fn parse_row_values(row: &[String], cols: &[usize]) -> Option<Vec<f64>> {
    cols.iter().map(|&col| parse_numeric(row, col)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(rows: &[&[&str]]) -> RawGrid {
        RawGrid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    fn header_of(grid: &RawGrid, row: usize) -> HeaderIndex {
        HeaderIndex::from_row(grid.row(row).unwrap_or(&[]))
    }

    #[test]
    fn test_lms_rows_parse_and_fractional_ages_truncate() {
        let grid = grid_of(&[
            &["Month", "L", "M", "S"],
            &["0", "-0.30", "13.40", "0.095"],
            &["1.5", "-0.27", "14.94", "0.090"],
        ]);
        let header = header_of(&grid, 0);
        match parse_lms(&grid, 0, &header) {
            Ok(SectionParse::Rows { rows, dropped }) => {
                assert_eq!(dropped, 0);
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1].0, 1);
            }
            other => panic!("expected parsed rows, got {other:?}"),
        }
    }

    #[test]
    fn test_lms_missing_column_is_an_omission() {
        let grid = grid_of(&[&["Month", "L", "M"], &["0", "1.0", "16.0"]]);
        let header = header_of(&grid, 0);
        match parse_lms(&grid, 0, &header) {
            Ok(SectionParse::Skipped(omission)) => {
                assert_eq!(omission.section, Section::Lms);
                assert!(omission.reason.contains('S'), "{}", omission.reason);
            }
            other => panic!("expected omission, got {other:?}"),
        }
    }

    #[test]
    fn test_lms_zero_s_fails_the_parse() {
        let grid = grid_of(&[
            &["Month", "L", "M", "S"],
            &["0", "1.0", "16.0", "0.1"],
            &["1", "1.0", "16.0", "0"],
        ]);
        let header = header_of(&grid, 0);
        let err = parse_lms(&grid, 0, &header).unwrap_err();
        assert!(matches!(err, GrowthRefError::TableFormatError(_)), "{err}");
    }

    #[test]
    fn test_rows_with_null_values_are_dropped() {
        let grid = grid_of(&[
            &["Month", "L", "M", "S"],
            &["0", "1.0", "", "0.1"],
            &["", "1.0", "16.0", "0.1"],
            &["2", "1.0", "16.0", "0.1"],
        ]);
        let header = header_of(&grid, 0);
        match parse_lms(&grid, 0, &header) {
            Ok(SectionParse::Rows { rows, dropped }) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(dropped, 2);
            }
            other => panic!("expected parsed rows, got {other:?}"),
        }
    }

    #[test]
    fn test_z_band_conventions_map_to_the_same_fields() {
        let young = grid_of(&[
            &["Month", "SD3neg", "SD2neg", "SD1neg", "SD0", "SD1", "SD2", "SD3"],
            &["0", "10.2", "11.1", "12.2", "13.4", "14.8", "16.3", "18.1"],
        ]);
        let old = grid_of(&[
            &["Month", "-3 SD", "-2 SD", "-1 SD", "Median", "1 SD", "2 SD", "3 SD"],
            &["61", "10.2", "11.1", "12.2", "13.4", "14.8", "16.3", "18.1"],
        ]);

        let young_header = header_of(&young, 0);
        let old_header = header_of(&old, 0);
        let young_parse = parse_z_bands(&young, 0, &young_header, ZBandConvention::Ages0To5);
        let old_parse = parse_z_bands(&old, 0, &old_header, ZBandConvention::Ages5To19);

        match (young_parse, old_parse) {
            (
                SectionParse::Rows { rows: young_rows, .. },
                SectionParse::Rows { rows: old_rows, .. },
            ) => {
                assert_eq!(young_rows[0].1, old_rows[0].1);
            }
            other => panic!("expected parsed rows, got {other:?}"),
        }
    }

    #[test]
    fn test_percentile_ordinal_convention_leaves_extremes_unset() {
        let grid = grid_of(&[
            &[
                "Month", "1st", "3rd", "5th", "15th", "25th", "50th", "75th", "85th", "95th",
                "97th", "99th",
            ],
            &[
                "61", "11.8", "12.3", "12.6", "13.3", "13.8", "14.9", "16.2", "17.0", "18.8",
                "19.6", "21.3",
            ],
        ]);
        let header = header_of(&grid, 0);
        match parse_percentiles(&grid, 0, &header, PercentileConvention::Ages5To19) {
            SectionParse::Rows { rows, .. } => {
                let bands = rows[0].1;
                assert_eq!(bands.p01, None);
                assert_eq!(bands.p50, 14.9);
                assert_eq!(bands.p999, None);
            }
            other => panic!("expected parsed rows, got {other:?}"),
        }
    }
}
