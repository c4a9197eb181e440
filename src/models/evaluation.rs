//! Evaluation outcome model
//!
//! Nutritional status categories, their associated risk levels, and the
//! result object an evaluation produces for downstream consumers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Follow-up urgency attached to a nutritional status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Routine monitoring
    Low = 1,
    /// Closer follow-up recommended
    Moderate = 2,
    /// Clinical attention required
    High = 3,
}

impl RiskLevel {
    /// Stable label used in serialized results
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutritional status category derived from the BMI-for-age z-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// z below -3
    SevereMalnutrition,
    /// z in [-3, -2)
    Malnutrition,
    /// z in [-2, -1)
    MalnutritionRisk,
    /// z in [-1, 1]
    Normal,
    /// z in (1, 2]
    Overweight,
    /// z in (2, 3]
    Obesity,
    /// z above 3
    SevereObesity,
}

impl Classification {
    /// Stable label used in serialized results
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SevereMalnutrition => "SEVERE_MALNUTRITION",
            Self::Malnutrition => "MALNUTRITION",
            Self::MalnutritionRisk => "MALNUTRITION_RISK",
            Self::Normal => "NORMAL",
            Self::Overweight => "OVERWEIGHT",
            Self::Obesity => "OBESITY",
            Self::SevereObesity => "SEVERE_OBESITY",
        }
    }

    /// Risk level attached to this category
    #[must_use]
    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Self::Normal => RiskLevel::Low,
            Self::MalnutritionRisk | Self::Overweight => RiskLevel::Moderate,
            Self::SevereMalnutrition | Self::Malnutrition | Self::Obesity | Self::SevereObesity => {
                RiskLevel::High
            }
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one measurement against the reference tables
///
/// `bmi`, `z_score` and `percentile` are rounded to two decimals here, at
/// the presentation boundary; the classification is always derived from
/// the unrounded z-score before this object is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Body mass index, kg/m²
    pub bmi: f64,
    /// BMI-for-age z-score against the matched reference point
    pub z_score: f64,
    /// Estimated percentile, present when the matched point carries
    /// percentile bands
    pub percentile: Option<f64>,
    /// Nutritional status category
    pub classification: Classification,
    /// Risk level for the category
    pub risk_level: RiskLevel,
}

impl EvaluationResult {
    /// Build a result from unrounded values
    #[must_use]
    pub fn new(bmi: f64, z_score: f64, percentile: Option<f64>, classification: Classification) -> Self {
        Self {
            bmi: round2(bmi),
            z_score: round2(z_score),
            percentile: percentile.map(round2),
            classification,
            risk_level: classification.risk_level(),
        }
    }
}

/// Round to two decimal places for presentation
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
