//! A Rust library for evaluating child anthropometry against the WHO
//! growth reference tables, with table ingestion, nearest-age lookup,
//! LMS z-score computation and nutritional status classification.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod models;
pub mod store;
pub mod table;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{LoaderOptions, SourceEntry, SourceManifest};
pub use error::{GrowthRefError, Result};
pub use evaluate::{AdviceSource, EvaluationService};
pub use store::{ReferenceStore, ReferenceStoreBuilder};

// Domain models
pub use models::evaluation::{Classification, EvaluationResult, RiskLevel};
pub use models::measurement::{Measurement, age_in_months};
pub use models::reference::{
    Lms, PercentileBands, ReferencePoint, ReferenceVersion, Sex, ZScoreBands,
};

// Numeric core
pub use algorithm::{bmi_for_z, classify, percentile_from_z, z_score};

// Table loading
pub use table::{BatchReport, TableKind, TableLoad, load_manifest, load_source};
