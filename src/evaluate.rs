//! Evaluation service
//!
//! Ties the pieces together for one request: validate the measurement,
//! derive BMI, look up the reference point, transform to a z-score, map
//! to a percentile when the point carries percentile bands, classify.
//! Pure computation over the frozen store; every failure is typed and
//! deterministic, so nothing here retries and nothing is logged above
//! debug level.

use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::algorithm::{classify, percentile_from_z, z_score};
use crate::error::{GrowthRefError, Result};
use crate::models::evaluation::{Classification, EvaluationResult};
use crate::models::measurement::{Measurement, age_in_months};
use crate::models::reference::{ReferenceVersion, Sex};
use crate::store::ReferenceStore;

/// External provider of advisory text for evaluation outcomes
///
/// Recommendation wording is not part of this crate; a collaborator
/// service generates it from the classification and the values that
/// produced it.
pub trait AdviceSource {
    /// Advisory strings for one evaluation outcome
    fn advise(&self, classification: Classification, bmi: f64, age_months: u32) -> Vec<String>;
}

/// Evaluates measurements against a frozen reference store
#[derive(Debug, Clone)]
pub struct EvaluationService {
    store: Arc<ReferenceStore>,
}

impl EvaluationService {
    /// Create a service over a shared store snapshot
    #[must_use]
    pub const fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Evaluate raw weight and height values.
    ///
    /// # Errors
    /// `InvalidMeasurementError` when the values are out of bounds,
    /// `ReferenceNotFoundError` when the (version, sex) series is not
    /// loaded.
    pub fn evaluate(
        &self,
        version: ReferenceVersion,
        sex: Sex,
        age_months: u32,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<EvaluationResult> {
        let measurement = Measurement::new(age_months, weight_kg, height_cm)?;
        self.evaluate_measurement(version, sex, &measurement)
    }

    /// Evaluate an already validated measurement.
    ///
    /// # Errors
    /// `ReferenceNotFoundError` when the (version, sex) series is not
    /// loaded.
    pub fn evaluate_measurement(
        &self,
        version: ReferenceVersion,
        sex: Sex,
        measurement: &Measurement,
    ) -> Result<EvaluationResult> {
        self.evaluate_bmi(version, sex, measurement.age_months(), measurement.bmi())
    }

    /// Evaluate a precomputed BMI value.
    ///
    /// # Errors
    /// `InvalidMeasurementError` when the BMI is not a positive finite
    /// number, `ReferenceNotFoundError` when the (version, sex) series
    /// is not loaded.
    pub fn evaluate_bmi(
        &self,
        version: ReferenceVersion,
        sex: Sex,
        age_months: u32,
        bmi: f64,
    ) -> Result<EvaluationResult> {
        if !(bmi.is_finite() && bmi > 0.0) {
            return Err(GrowthRefError::InvalidMeasurementError(format!(
                "BMI must be a positive number, got {bmi}"
            )));
        }

        let point = self.store.lookup(version, sex, age_months)?;
        let z = z_score(bmi, &point.lms);
        let percentile = point.percentiles.is_some().then(|| percentile_from_z(z));
        let classification = classify(z);
        debug!(
            "Evaluated {version}/{sex} age {age_months}: bmi {bmi:.2}, z {z:.4}, {classification}"
        );

        Ok(EvaluationResult::new(bmi, z, percentile, classification))
    }

    /// Evaluate from a birth date, deriving the age in completed months
    /// and selecting the standard that covers it.
    ///
    /// # Errors
    /// Same failure modes as [`Self::evaluate`].
    pub fn evaluate_at(
        &self,
        sex: Sex,
        birth_date: NaiveDate,
        measured_on: NaiveDate,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<EvaluationResult> {
        let age_months = age_in_months(birth_date, measured_on);
        let version = ReferenceVersion::for_age_months(age_months);
        self.evaluate(version, sex, age_months, weight_kg, height_cm)
    }

    /// Evaluate and consult an advice source with the outcome.
    ///
    /// # Errors
    /// Same failure modes as [`Self::evaluate`]; the advice source is
    /// only consulted after a successful evaluation.
    pub fn evaluate_with_advice(
        &self,
        version: ReferenceVersion,
        sex: Sex,
        age_months: u32,
        weight_kg: f64,
        height_cm: f64,
        advice: &dyn AdviceSource,
    ) -> Result<(EvaluationResult, Vec<String>)> {
        let result = self.evaluate(version, sex, age_months, weight_kg, height_cm)?;
        let recommendations = advice.advise(result.classification, result.bmi, age_months);
        Ok((result, recommendations))
    }

    /// The store this service evaluates against
    #[must_use]
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }
}
