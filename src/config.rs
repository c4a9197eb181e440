//! Configuration for reference table loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GrowthRefError, Result};
use crate::models::reference::{ReferenceVersion, Sex};
use crate::table::TableKind;

/// Tuning options for the table loader
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// How many leading rows to scan for the header before assuming
    /// the file starts with one
    pub header_scan_limit: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            header_scan_limit: 50,
        }
    }
}

impl LoaderOptions {
    /// Set the header scan window
    #[must_use]
    pub const fn with_header_scan_limit(mut self, limit: usize) -> Self {
        self.header_scan_limit = limit;
        self
    }
}

/// One source file and the series it feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// File name, resolved relative to the batch base directory
    pub file: String,
    /// Standard the file belongs to
    pub version: ReferenceVersion,
    /// Sex the file covers
    pub sex: Sex,
    /// Layout family of the file
    pub kind: TableKind,
}

/// Mapping from source files to reference series
///
/// Externalizes the file routing table so deployments can swap table
/// sets without recompiling. The JSON form is a flat list of entries:
///
/// ```json
/// { "entries": [
///   { "file": "bmifa-girls-5-19years-z.csv",
///     "version": "WHO_2007", "sex": "F", "kind": "z_5_19" }
/// ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceManifest {
    /// Entries in load order; later entries overwrite earlier ones on
    /// key collisions
    pub entries: Vec<SourceEntry>,
}

impl SourceManifest {
    /// Read a manifest from a JSON file.
    ///
    /// # Errors
    /// Returns `IoError` when the file cannot be read and
    /// `ManifestError` when it is not a valid manifest.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            GrowthRefError::ManifestError(format!("{}: {e}", path.display()))
        })
    }

    /// The standard WHO BMI-for-age table set: eight CSV exports
    /// covering both sexes across both standards.
    #[must_use]
    pub fn who_default() -> Self {
        let entry = |file: &str, version, sex, kind| SourceEntry {
            file: file.to_string(),
            version,
            sex,
            kind,
        };
        Self {
            entries: vec![
                entry(
                    "bmi_boys_0-to-2-years_zcores.csv",
                    ReferenceVersion::Who2006,
                    Sex::Male,
                    TableKind::ZScores0To5,
                ),
                entry(
                    "bmi_boys_2-to-5-years_zscores.csv",
                    ReferenceVersion::Who2006,
                    Sex::Male,
                    TableKind::ZScores0To5,
                ),
                entry(
                    "tab_bmi_girls_p_0_2.csv",
                    ReferenceVersion::Who2006,
                    Sex::Female,
                    TableKind::Percentiles0To5,
                ),
                entry(
                    "tab_bmi_girls_p_2_5.csv",
                    ReferenceVersion::Who2006,
                    Sex::Female,
                    TableKind::Percentiles0To5,
                ),
                entry(
                    "bmifa-boys-5-19years-per.csv",
                    ReferenceVersion::Who2007,
                    Sex::Male,
                    TableKind::Percentiles5To19,
                ),
                entry(
                    "bmifa-boys-5-19years-z.csv",
                    ReferenceVersion::Who2007,
                    Sex::Male,
                    TableKind::ZScores5To19,
                ),
                entry(
                    "bmifa-girls-5-19years-per.csv",
                    ReferenceVersion::Who2007,
                    Sex::Female,
                    TableKind::Percentiles5To19,
                ),
                entry(
                    "bmifa-girls-5-19years-z.csv",
                    ReferenceVersion::Who2007,
                    Sex::Female,
                    TableKind::ZScores5To19,
                ),
            ],
        }
    }

    /// The (version, sex) series this manifest intends to provide
    #[must_use]
    pub fn declared_series(&self) -> Vec<(ReferenceVersion, Sex)> {
        let mut series: Vec<(ReferenceVersion, Sex)> = self
            .entries
            .iter()
            .map(|entry| (entry.version, entry.sex))
            .collect();
        series.sort_unstable_by_key(|(version, sex)| (version.as_str(), sex.as_str()));
        series.dedup();
        series
    }
}
