//! Measurement validation and BMI derivation

use chrono::NaiveDate;
use growth_ref::{GrowthRefError, Measurement, age_in_months};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_valid_measurement_derives_bmi() {
    let measurement = Measurement::new(24, 11.0, 85.0).unwrap();
    assert_eq!(measurement.age_months(), 24);
    assert_eq!(measurement.weight_kg(), 11.0);
    assert_eq!(measurement.height_cm(), 85.0);
    assert!((measurement.bmi() - 15.2249).abs() < 1e-4);
}

#[test]
fn test_height_at_or_below_three_is_meters() {
    let in_meters = Measurement::new(24, 11.0, 0.85).unwrap();
    let in_centimeters = Measurement::new(24, 11.0, 85.0).unwrap();
    assert_eq!(in_meters, in_centimeters);
    assert_eq!(in_meters.height_cm(), 85.0);
}

#[test]
fn test_meter_correction_applies_before_bounds() {
    // 3.0 is treated as meters, and 300 cm is out of bounds
    let err = Measurement::new(24, 11.0, 3.0).unwrap_err();
    match err {
        GrowthRefError::InvalidMeasurementError(msg) => {
            assert!(msg.contains("height"), "{msg}");
            assert!(msg.contains("250"), "{msg}");
        }
        other => panic!("expected InvalidMeasurementError, got {other}"),
    }
}

#[test]
fn test_overweight_bound_names_the_weight() {
    let err = Measurement::new(24, 250.0, 85.0).unwrap_err();
    match err {
        GrowthRefError::InvalidMeasurementError(msg) => {
            assert!(msg.contains("weight"), "{msg}");
            assert!(msg.contains("200"), "{msg}");
            assert!(msg.contains("250"), "{msg}");
        }
        other => panic!("expected InvalidMeasurementError, got {other}"),
    }
}

#[test]
fn test_non_positive_values_are_rejected() {
    assert!(Measurement::new(24, 0.0, 85.0).is_err());
    assert!(Measurement::new(24, -4.0, 85.0).is_err());
    assert!(Measurement::new(24, 11.0, 0.0).is_err());
    assert!(Measurement::new(24, 11.0, -85.0).is_err());
    assert!(Measurement::new(24, f64::NAN, 85.0).is_err());
}

#[test]
fn test_bounds_are_inclusive_at_the_top() {
    assert!(Measurement::new(24, 200.0, 85.0).is_ok());
    assert!(Measurement::new(24, 11.0, 250.0).is_ok());
    assert!(Measurement::new(24, 200.1, 85.0).is_err());
    assert!(Measurement::new(24, 11.0, 250.1).is_err());
}

#[test]
fn test_age_in_months_counts_completed_months() {
    let birth = date(2020, 1, 15);
    assert_eq!(age_in_months(birth, date(2022, 1, 15)), 24);
    assert_eq!(age_in_months(birth, date(2022, 1, 14)), 23);
    assert_eq!(age_in_months(birth, date(2020, 2, 14)), 0);
    assert_eq!(age_in_months(birth, date(2020, 2, 15)), 1);
}

#[test]
fn test_age_in_months_saturates_before_birth() {
    let birth = date(2020, 1, 15);
    assert_eq!(age_in_months(birth, date(2019, 12, 31)), 0);
    assert_eq!(age_in_months(birth, birth), 0);
}
