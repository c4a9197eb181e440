//! Cut-point classification of BMI-for-age z-scores
//!
//! The category boundaries follow the WHO BMI-for-age interpretation:
//! whole-number z cut-points, with the normal range closed at both ends.

use crate::models::evaluation::Classification;

/// Classify an unrounded z-score into a nutritional status category.
///
/// Boundary placement: -3 falls in `Malnutrition`, -2 in
/// `MalnutritionRisk`, -1 and 1 in `Normal`, 2 in `Overweight` and 3 in
/// `Obesity`. Total over all finite z.
#[must_use]
pub fn classify(z: f64) -> Classification {
    if z < -3.0 {
        Classification::SevereMalnutrition
    } else if z < -2.0 {
        Classification::Malnutrition
    } else if z < -1.0 {
        Classification::MalnutritionRisk
    } else if z <= 1.0 {
        Classification::Normal
    } else if z <= 2.0 {
        Classification::Overweight
    } else if z <= 3.0 {
        Classification::Obesity
    } else {
        Classification::SevereObesity
    }
}
