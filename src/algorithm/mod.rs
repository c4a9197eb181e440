//! Algorithms for growth standard evaluation
//!
//! This module contains the numeric core of the engine: the LMS z-score
//! transform, the standard normal CDF used for percentile estimation, and
//! the cut-point classification of z-scores into nutritional status
//! categories.

pub mod classify;
pub mod lms;
pub mod normal;

pub use classify::classify;
pub use lms::{bmi_for_z, z_score};
pub use normal::percentile_from_z;
