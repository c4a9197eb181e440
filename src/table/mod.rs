//! Reference table loading
//!
//! Turns WHO table exports into reference store rows. Loading is
//! best-effort by design: a file can contribute one section and omit
//! another, and in the batch path a file that fails entirely is recorded
//! and skipped rather than aborting the run. What was loaded, dropped
//! and omitted is reported back to the caller in full.

pub mod grid;
pub mod header;
pub mod parse;

use std::path::{Path, PathBuf};

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{LoaderOptions, SourceManifest};
use crate::error::Result;
use crate::models::reference::{Lms, PercentileBands, ReferenceVersion, Sex, ZScoreBands};
use crate::store::ReferenceStoreBuilder;
use crate::utils::{
    create_main_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
    log_warning,
};
use grid::RawGrid;
use header::{HeaderIndex, detect_header_row};
use parse::{
    Omission, PercentileConvention, SectionParse, ZBandConvention, parse_lms, parse_percentiles,
    parse_z_bands,
};

/// The layout family of a source file, as declared by the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    /// 0-5 z-score file: LMS plus `SD3neg ... SD3` bands
    #[serde(rename = "z_0_5")]
    ZScores0To5,
    /// 0-5 percentile file: LMS plus `P01 ... P999` bands
    #[serde(rename = "p_0_5")]
    Percentiles0To5,
    /// 5-19 z-score file: LMS plus `-3 SD ... 3 SD` bands
    #[serde(rename = "z_5_19")]
    ZScores5To19,
    /// 5-19 percentile file: LMS plus ordinal percentile bands
    #[serde(rename = "p_5_19")]
    Percentiles5To19,
}

impl TableKind {
    /// Manifest tag for this kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZScores0To5 => "z_0_5",
            Self::Percentiles0To5 => "p_0_5",
            Self::ZScores5To19 => "z_5_19",
            Self::Percentiles5To19 => "p_5_19",
        }
    }

    /// Z-score band convention carried by this kind, if any
    const fn z_band_convention(self) -> Option<ZBandConvention> {
        match self {
            Self::ZScores0To5 => Some(ZBandConvention::Ages0To5),
            Self::ZScores5To19 => Some(ZBandConvention::Ages5To19),
            Self::Percentiles0To5 | Self::Percentiles5To19 => None,
        }
    }

    /// Percentile band convention carried by this kind, if any
    const fn percentile_convention(self) -> Option<PercentileConvention> {
        match self {
            Self::Percentiles0To5 => Some(PercentileConvention::Ages0To5),
            Self::Percentiles5To19 => Some(PercentileConvention::Ages5To19),
            Self::ZScores0To5 | Self::ZScores5To19 => None,
        }
    }
}

/// Report of one source file load
#[derive(Debug, Clone)]
pub struct TableLoad {
    /// Source file
    pub path: PathBuf,
    /// Standard the rows were filed under
    pub version: ReferenceVersion,
    /// Sex the rows were filed under
    pub sex: Sex,
    /// Declared layout family
    pub kind: TableKind,
    /// Row index the header was detected at
    pub header_row: usize,
    /// LMS rows written to the store
    pub lms_rows: usize,
    /// Z-score band rows written to the store
    pub z_band_rows: usize,
    /// Percentile band rows written to the store
    pub percentile_rows: usize,
    /// Rows dropped by the row filter, summed over sections
    pub rows_dropped: usize,
    /// Parse paths skipped for this file
    pub omissions: Vec<Omission>,
}

impl TableLoad {
    /// Total rows written to the store across sections
    #[must_use]
    pub const fn rows_loaded(&self) -> usize {
        self.lms_rows + self.z_band_rows + self.percentile_rows
    }
}

/// Parsed sections of one file, not yet applied to a store builder
#[derive(Debug)]
struct ParsedTable {
    lms: Vec<(u32, Lms)>,
    z_bands: Vec<(u32, ZScoreBands)>,
    percentiles: Vec<(u32, PercentileBands)>,
    load: TableLoad,
}

impl ParsedTable {
    /// Write every parsed row into the builder, in section order
    fn apply(self, builder: &mut ReferenceStoreBuilder) -> TableLoad {
        let (version, sex) = (self.load.version, self.load.sex);
        for (age, lms) in self.lms {
            builder.insert_lms(version, sex, age, lms);
        }
        for (age, bands) in self.z_bands {
            builder.insert_z_bands(version, sex, age, bands);
        }
        for (age, bands) in self.percentiles {
            builder.insert_percentiles(version, sex, age, bands);
        }
        self.load
    }
}

/// Load one reference table file into the store builder.
///
/// Skipped sections are reported inside the returned `TableLoad` and
/// logged as warnings; they are not errors.
///
/// # Errors
/// Returns an error when the file cannot be read as CSV, or when a row
/// carries a non-positive `M` or `S`.
pub fn load_source(
    path: &Path,
    version: ReferenceVersion,
    sex: Sex,
    kind: TableKind,
    options: &LoaderOptions,
    builder: &mut ReferenceStoreBuilder,
) -> Result<TableLoad> {
    let start = std::time::Instant::now();
    log_operation_start("Loading reference table", path);
    let parsed = parse_source(path, version, sex, kind, options)?;
    let load = parsed.apply(builder);
    for omission in &load.omissions {
        log_warning(&omission.to_string(), Some(path));
    }
    log_operation_complete("loaded", path, load.rows_loaded(), Some(start.elapsed()));
    Ok(load)
}

/// Parse one file into section rows without touching any builder
fn parse_source(
    path: &Path,
    version: ReferenceVersion,
    sex: Sex,
    kind: TableKind,
    options: &LoaderOptions,
) -> Result<ParsedTable> {
    let grid = RawGrid::from_csv_path(path)?;
    let header_row = detect_header_row(&grid, options.header_scan_limit);
    let header = HeaderIndex::from_row(grid.row(header_row).unwrap_or(&[]));

    let mut omissions = Vec::new();
    let mut rows_dropped = 0usize;

    let lms = match parse_lms(&grid, header_row, &header)? {
        SectionParse::Rows { rows, dropped } => {
            rows_dropped += dropped;
            rows
        }
        SectionParse::Skipped(omission) => {
            omissions.push(omission);
            Vec::new()
        }
    };

    let z_bands = match kind.z_band_convention() {
        Some(convention) => match parse_z_bands(&grid, header_row, &header, convention) {
            SectionParse::Rows { rows, dropped } => {
                rows_dropped += dropped;
                rows
            }
            SectionParse::Skipped(omission) => {
                omissions.push(omission);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let percentiles = match kind.percentile_convention() {
        Some(convention) => match parse_percentiles(&grid, header_row, &header, convention) {
            SectionParse::Rows { rows, dropped } => {
                rows_dropped += dropped;
                rows
            }
            SectionParse::Skipped(omission) => {
                omissions.push(omission);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let load = TableLoad {
        path: path.to_path_buf(),
        version,
        sex,
        kind,
        header_row,
        lms_rows: lms.len(),
        z_band_rows: z_bands.len(),
        percentile_rows: percentiles.len(),
        rows_dropped,
        omissions,
    };

    Ok(ParsedTable {
        lms,
        z_bands,
        percentiles,
        load,
    })
}

/// Report of a manifest-driven batch load
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Files that loaded, in manifest order
    pub loads: Vec<TableLoad>,
    /// Files that were skipped, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Whether nothing at all was loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Total rows written to the store across all files
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.loads.iter().map(TableLoad::rows_loaded).sum()
    }

    /// Total skipped parse paths across all files
    #[must_use]
    pub fn omission_count(&self) -> usize {
        self.loads.iter().map(|load| load.omissions.len()).sum()
    }
}

/// Load every manifest entry into the store builder.
///
/// Files are parsed in parallel; builder writes happen afterwards in
/// manifest order, so later entries overwrite earlier ones exactly as a
/// sequential load would. Missing or unreadable files are recorded in
/// the report and never abort the batch.
pub fn load_manifest(
    base_dir: &Path,
    manifest: &SourceManifest,
    options: &LoaderOptions,
    builder: &mut ReferenceStoreBuilder,
) -> BatchReport {
    enum EntryOutcome {
        Parsed(ParsedTable),
        Skipped { path: PathBuf, reason: String },
    }

    let start = std::time::Instant::now();
    log_operation_start("Loading reference tables from", base_dir);

    let pb = create_main_progress_bar(
        manifest.entries.len() as u64,
        Some("Loading reference tables"),
    );
    let outcomes: Vec<EntryOutcome> = manifest
        .entries
        .par_iter()
        .progress_with(pb.clone())
        .map(|entry| {
            let path = base_dir.join(&entry.file);
            if !path.is_file() {
                return EntryOutcome::Skipped {
                    path,
                    reason: "file not found".to_string(),
                };
            }
            match parse_source(&path, entry.version, entry.sex, entry.kind, options) {
                Ok(parsed) => EntryOutcome::Parsed(parsed),
                Err(e) => EntryOutcome::Skipped {
                    path,
                    reason: e.to_string(),
                },
            }
        })
        .collect();
    finish_progress_bar(&pb, None);

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            EntryOutcome::Parsed(parsed) => {
                let load = parsed.apply(builder);
                for omission in &load.omissions {
                    log_warning(&omission.to_string(), Some(&load.path));
                }
                report.loads.push(load);
            }
            EntryOutcome::Skipped { path, reason } => {
                log_warning(&format!("Skipping reference table: {reason}"), Some(&path));
                report.skipped.push((path, reason));
            }
        }
    }

    log::info!(
        "Loaded {} of {} reference tables ({} rows) in {:?}",
        report.loads.len(),
        manifest.entries.len(),
        report.total_rows(),
        start.elapsed()
    );

    report
}
