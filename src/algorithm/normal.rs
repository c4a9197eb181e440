//! Standard normal CDF for percentile estimation

/// Percentile (0-100) corresponding to a z-score under the standard
/// normal distribution.
#[must_use]
pub fn percentile_from_z(z: f64) -> f64 {
    standard_normal_cdf(z) * 100.0
}

/// Computes the standard normal CDF using the error function approximation.
#[must_use]
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / 2.0_f64.sqrt()))
}

/// Computes the error function using the Abramowitz and Stegun
/// approximation (maximum absolute error around 1.5e-7).
fn erf(x: f64) -> f64 {
    // Constants for the approximation
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}
