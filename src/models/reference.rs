//! WHO growth reference table model
//!
//! A reference table is a set of rows keyed by (version, sex, age in
//! months). Every row carries an LMS triplet; depending on the source file
//! it may additionally carry z-score bands and percentile bands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GrowthRefError, Result};

/// WHO growth standard edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceVersion {
    /// WHO Child Growth Standards, ages 0-5 years
    #[serde(rename = "WHO_2006", alias = "OMS_2006")]
    Who2006,
    /// WHO Growth Reference, ages 5-19 years
    #[serde(rename = "WHO_2007", alias = "OMS_2007")]
    Who2007,
}

impl ReferenceVersion {
    /// Stable identifier used in manifests, logs and serialized results
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Who2006 => "WHO_2006",
            Self::Who2007 => "WHO_2007",
        }
    }

    /// Select the standard covering the given age.
    ///
    /// The 0-5 tables include month 60 and the 5-19 tables begin at month
    /// 61, so 60 months still resolves to `Who2006`.
    #[must_use]
    pub const fn for_age_months(age_months: u32) -> Self {
        if age_months <= 60 {
            Self::Who2006
        } else {
            Self::Who2007
        }
    }
}

impl fmt::Display for ReferenceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceVersion {
    type Err = GrowthRefError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "WHO_2006" | "OMS_2006" => Ok(Self::Who2006),
            "WHO_2007" | "OMS_2007" => Ok(Self::Who2007),
            other => Err(GrowthRefError::ManifestError(format!(
                "unknown reference version: {other}"
            ))),
        }
    }
}

/// Biological sex as recorded in the reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male
    #[serde(rename = "M", alias = "male", alias = "Male")]
    Male,
    /// Female
    #[serde(rename = "F", alias = "female", alias = "Female")]
    Female,
}

impl Sex {
    /// Single-letter identifier used in manifests and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = GrowthRefError;

    /// Parse leniently: the first non-whitespace character decides,
    /// case-insensitively, so `"M"`, `"male"` and `" f "` all resolve.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('M') => Ok(Self::Male),
            Some('F') => Ok(Self::Female),
            _ => Err(GrowthRefError::ManifestError(format!(
                "unknown sex code: {s:?}"
            ))),
        }
    }
}

/// LMS parameters for one reference age
///
/// The triplet drives the z-score transform: `L` is the Box-Cox power,
/// `M` the median and `S` the coefficient of variation. `M` and `S` must
/// be strictly positive; a table row violating that is rejected at load
/// time so the evaluation path never sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lms {
    l: f64,
    m: f64,
    s: f64,
}

impl Lms {
    /// Create a validated triplet.
    ///
    /// # Errors
    /// Returns `TableFormatError` when `M` or `S` is zero, negative or
    /// non-finite.
    pub fn new(l: f64, m: f64, s: f64) -> Result<Self> {
        if !l.is_finite() || !m.is_finite() || !s.is_finite() {
            return Err(GrowthRefError::TableFormatError(format!(
                "non-finite LMS parameters: L={l}, M={m}, S={s}"
            )));
        }
        if m <= 0.0 {
            return Err(GrowthRefError::TableFormatError(format!(
                "median M must be positive, got {m}"
            )));
        }
        if s <= 0.0 {
            return Err(GrowthRefError::TableFormatError(format!(
                "coefficient of variation S must be positive, got {s}"
            )));
        }
        Ok(Self { l, m, s })
    }

    /// Box-Cox power
    #[must_use]
    pub const fn l(&self) -> f64 {
        self.l
    }

    /// Median of the measure at this age
    #[must_use]
    pub const fn m(&self) -> f64 {
        self.m
    }

    /// Coefficient of variation
    #[must_use]
    pub const fn s(&self) -> f64 {
        self.s
    }
}

/// Precomputed z-score band values for one reference age
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreBands {
    /// Measure value at -3 SD
    pub sd_m3: f64,
    /// Measure value at -2 SD
    pub sd_m2: f64,
    /// Measure value at -1 SD
    pub sd_m1: f64,
    /// Measure value at the median
    pub median: f64,
    /// Measure value at +1 SD
    pub sd_p1: f64,
    /// Measure value at +2 SD
    pub sd_p2: f64,
    /// Measure value at +3 SD
    pub sd_p3: f64,
}

/// Precomputed percentile band values for one reference age
///
/// The canonical set is the union of the two source conventions. The 0-5
/// files carry four columns the 5-19 files do not (0.1st, 10th, 90th and
/// 99.9th), so those are optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBands {
    /// 0.1st percentile, 0-5 tables only
    pub p01: Option<f64>,
    /// 1st percentile
    pub p1: f64,
    /// 3rd percentile
    pub p3: f64,
    /// 5th percentile
    pub p5: f64,
    /// 10th percentile, 0-5 tables only
    pub p10: Option<f64>,
    /// 15th percentile
    pub p15: f64,
    /// 25th percentile
    pub p25: f64,
    /// 50th percentile
    pub p50: f64,
    /// 75th percentile
    pub p75: f64,
    /// 85th percentile
    pub p85: f64,
    /// 90th percentile, 0-5 tables only
    pub p90: Option<f64>,
    /// 95th percentile
    pub p95: f64,
    /// 97th percentile
    pub p97: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile, 0-5 tables only
    pub p999: Option<f64>,
}

/// One fully merged row of a growth reference table
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    /// Growth standard edition this row belongs to
    pub version: ReferenceVersion,
    /// Sex this row applies to
    pub sex: Sex,
    /// Age in completed months
    pub age_months: u32,
    /// LMS parameters, always present
    pub lms: Lms,
    /// Z-score bands when the source carried them
    pub z_bands: Option<ZScoreBands>,
    /// Percentile bands when the source carried them
    pub percentiles: Option<PercentileBands>,
}

impl ReferencePoint {
    /// Create a point carrying only the LMS triplet
    #[must_use]
    pub const fn new(version: ReferenceVersion, sex: Sex, age_months: u32, lms: Lms) -> Self {
        Self {
            version,
            sex,
            age_months,
            lms,
            z_bands: None,
            percentiles: None,
        }
    }

    /// Attach z-score bands
    #[must_use]
    pub const fn with_z_bands(mut self, bands: ZScoreBands) -> Self {
        self.z_bands = Some(bands);
        self
    }

    /// Attach percentile bands
    #[must_use]
    pub const fn with_percentiles(mut self, bands: PercentileBands) -> Self {
        self.percentiles = Some(bands);
        self
    }
}
