//! Error handling for the growth reference engine.

use std::io;

use crate::models::reference::{ReferenceVersion, Sex};

/// Specialized error type for growth reference operations
#[derive(Debug, thiserror::Error)]
pub enum GrowthRefError {
    /// Error opening or reading a source file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error reading CSV data
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A reference table row or section cannot be interpreted
    #[error("Table format error: {0}")]
    TableFormatError(String),

    /// A measurement violates its physiological bounds
    #[error("Invalid measurement: {0}")]
    InvalidMeasurementError(String),

    /// No reference rows are loaded for the requested series
    #[error("No reference data for version {version}, sex {sex}")]
    ReferenceNotFoundError {
        /// Growth standard the lookup targeted
        version: ReferenceVersion,
        /// Sex the lookup targeted
        sex: Sex,
    },

    /// The source manifest cannot be read or interpreted
    #[error("Manifest error: {0}")]
    ManifestError(String),
}

/// Alias for Result with `GrowthRefError`
pub type Result<T> = std::result::Result<T, GrowthRefError>;
