//! LMS transform properties

use growth_ref::{Lms, bmi_for_z, z_score};
use rand::Rng;

fn lms(l: f64, m: f64, s: f64) -> Lms {
    Lms::new(l, m, s).unwrap()
}

#[test]
fn test_z_at_the_median_is_zero() {
    for triplet in [lms(1.0, 16.0, 0.1), lms(0.0, 16.0, 0.1), lms(-1.6, 15.3, 0.08)] {
        assert!(z_score(triplet.m(), &triplet).abs() < 1e-12);
    }
}

#[test]
fn test_known_reference_values() {
    // BMI 15.2249 (11 kg at 85 cm) against L=1, M=16, S=0.1
    let triplet = lms(1.0, 16.0, 0.1);
    let z = z_score(11.0 / (0.85 * 0.85), &triplet);
    assert!((z - (-0.484_429)).abs() < 1e-4, "z = {z}");

    // BMI 8.1633 (4 kg at 70 cm) against the same point
    let z = z_score(4.0 / (0.70 * 0.70), &triplet);
    assert!((z - (-4.897_959)).abs() < 1e-4, "z = {z}");
}

#[test]
fn test_z_is_monotonic_in_bmi() {
    let triplet = lms(-1.6, 15.3, 0.08);
    let mut previous = z_score(8.0, &triplet);
    let mut bmi = 8.5;
    while bmi <= 40.0 {
        let z = z_score(bmi, &triplet);
        assert!(z > previous, "z({bmi}) = {z} not above {previous}");
        previous = z;
        bmi += 0.5;
    }
}

#[test]
fn test_z_is_monotonic_for_random_triplets() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let triplet = lms(
            rng.random_range(-3.0..3.0),
            rng.random_range(10.0..25.0),
            rng.random_range(0.05..0.2),
        );
        let low: f64 = rng.random_range(5.0..30.0);
        let high = low + rng.random_range(0.01..10.0);
        assert!(
            z_score(low, &triplet) < z_score(high, &triplet),
            "monotonicity broke for {triplet:?} at bmi {low} vs {high}"
        );
    }
}

#[test]
fn test_log_branch_is_the_limit_of_the_box_cox_branch() {
    // The general formula converges to the L=0 form as L goes to zero
    let at_zero = lms(0.0, 16.0, 0.1);
    let near_zero = lms(1e-6, 16.0, 0.1);
    for bmi in [9.0, 13.5, 16.0, 21.0, 34.0] {
        let exact = z_score(bmi, &at_zero);
        let approx = z_score(bmi, &near_zero);
        assert!(
            (exact - approx).abs() < 1e-3,
            "bmi {bmi}: log branch {exact} vs L=1e-6 {approx}"
        );
    }
}

#[test]
fn test_round_trip_recovers_z() {
    let triplets = [
        lms(1.0, 16.0, 0.1),
        lms(0.0, 16.0, 0.1),
        lms(-1.6, 15.3, 0.08),
        lms(0.5, 13.4, 0.095),
    ];
    for triplet in triplets {
        for z in [-3.5, -2.0, -0.5, 0.0, 0.5, 2.0, 3.5] {
            let bmi = bmi_for_z(z, &triplet);
            assert!(bmi > 0.0, "inverse left its domain for {triplet:?} at z {z}");
            let recovered = z_score(bmi, &triplet);
            assert!(
                (recovered - z).abs() < 1e-6,
                "{triplet:?}: z {z} round-tripped to {recovered}"
            );
        }
    }
}

#[test]
fn test_inverse_outside_the_box_cox_domain_is_nan() {
    // 1 + L*S*z <= 0 has no real Box-Cox value
    let triplet = lms(2.0, 16.0, 0.5);
    assert!(bmi_for_z(-1.5, &triplet).is_nan());
}

#[test]
fn test_lms_construction_rejects_degenerate_parameters() {
    assert!(Lms::new(1.0, 16.0, 0.0).is_err());
    assert!(Lms::new(1.0, 16.0, -0.1).is_err());
    assert!(Lms::new(1.0, 0.0, 0.1).is_err());
    assert!(Lms::new(1.0, -16.0, 0.1).is_err());
    assert!(Lms::new(f64::NAN, 16.0, 0.1).is_err());
    assert!(Lms::new(0.0, 16.0, 0.1).is_ok());
}
