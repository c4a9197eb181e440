//! LMS z-score transform
//!
//! The WHO growth standards model each measure at each age as a Box-Cox
//! normal distribution described by three parameters: power `L`, median
//! `M` and coefficient of variation `S`. A measured value maps to a
//! z-score through the transform below; `L = 0` is the lognormal limit
//! and uses the logarithmic form.

use crate::models::reference::Lms;

/// Z-score of a BMI value against an LMS triplet.
///
/// `z = ((bmi / M)^L - 1) / (L * S)`, or `ln(bmi / M) / S` when `L = 0`.
/// Full double precision, no clamping and no rounding; presentation
/// rounding happens in `EvaluationResult`.
#[must_use]
pub fn z_score(bmi: f64, lms: &Lms) -> f64 {
    let (l, m, s) = (lms.l(), lms.m(), lms.s());
    if l == 0.0 {
        (bmi / m).ln() / s
    } else {
        ((bmi / m).powf(l) - 1.0) / (l * s)
    }
}

/// Inverse transform: the BMI value sitting at a given z-score.
///
/// `bmi = M * (1 + L * S * z)^(1/L)`, or `M * exp(S * z)` when `L = 0`.
/// Defined while `1 + L * S * z > 0`; outside that domain the Box-Cox
/// form has no real value and NaN is returned.
#[must_use]
pub fn bmi_for_z(z: f64, lms: &Lms) -> f64 {
    let (l, m, s) = (lms.l(), lms.m(), lms.s());
    if l == 0.0 {
        m * (s * z).exp()
    } else {
        m * (1.0 + l * s * z).powf(1.0 / l)
    }
}
