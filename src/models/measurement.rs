//! Validated anthropometric measurements
//!
//! Construction is the validation boundary: once a `Measurement` exists,
//! weight and height are inside physiological bounds and height is in
//! centimeters, so BMI can be derived without further checks.

use chrono::{Datelike, NaiveDate};

use crate::error::{GrowthRefError, Result};

/// Upper bound for acceptable weight, in kilograms
pub const MAX_WEIGHT_KG: f64 = 200.0;
/// Upper bound for acceptable height, in centimeters
pub const MAX_HEIGHT_CM: f64 = 250.0;

/// Heights at or below this value are taken to be meters and rescaled
const METERS_THRESHOLD: f64 = 3.0;

/// One anthropometric observation of a child
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    age_months: u32,
    weight_kg: f64,
    height_cm: f64,
}

impl Measurement {
    /// Validate raw inputs into a measurement.
    ///
    /// A height of 3.0 or less is interpreted as meters and converted to
    /// centimeters before bounds are checked, so `0.85` and `85.0` denote
    /// the same height.
    ///
    /// # Errors
    /// Returns `InvalidMeasurementError` naming the violated bound when
    /// weight is outside (0, 200] kg or height is outside (0, 250] cm.
    pub fn new(age_months: u32, weight_kg: f64, height_cm: f64) -> Result<Self> {
        let height_cm = if height_cm > 0.0 && height_cm <= METERS_THRESHOLD {
            height_cm * 100.0
        } else {
            height_cm
        };

        if !(weight_kg > 0.0 && weight_kg <= MAX_WEIGHT_KG) {
            return Err(GrowthRefError::InvalidMeasurementError(format!(
                "weight must be in (0, {MAX_WEIGHT_KG}] kg, got {weight_kg}"
            )));
        }
        if !(height_cm > 0.0 && height_cm <= MAX_HEIGHT_CM) {
            return Err(GrowthRefError::InvalidMeasurementError(format!(
                "height must be in (0, {MAX_HEIGHT_CM}] cm, got {height_cm}"
            )));
        }

        Ok(Self {
            age_months,
            weight_kg,
            height_cm,
        })
    }

    /// Age in completed months at the time of measurement
    #[must_use]
    pub const fn age_months(&self) -> u32 {
        self.age_months
    }

    /// Weight in kilograms
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Height in centimeters, after any meter correction
    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Body mass index in kg/m²
    #[must_use]
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

/// Completed months between a birth date and a measurement date.
///
/// A day-of-month not yet reached does not count as a completed month,
/// and dates before birth yield 0.
#[must_use]
pub fn age_in_months(birth_date: NaiveDate, on_date: NaiveDate) -> u32 {
    if on_date <= birth_date {
        return 0;
    }
    let mut months = (on_date.year() - birth_date.year()) * 12
        + (on_date.month() as i32 - birth_date.month() as i32);
    if on_date.day() < birth_date.day() {
        months -= 1;
    }
    months.max(0) as u32
}
