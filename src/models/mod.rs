//! Domain models for growth reference evaluation
//!
//! This module contains the value types the engine operates on: validated
//! anthropometric measurements, WHO reference table rows, and the
//! classification results produced by an evaluation.

pub mod evaluation;
pub mod measurement;
pub mod reference;

// Re-export commonly used types
pub use evaluation::{Classification, EvaluationResult, RiskLevel};
pub use measurement::{Measurement, age_in_months};
pub use reference::{Lms, PercentileBands, ReferencePoint, ReferenceVersion, Sex, ZScoreBands};
