//! Cut-point classification boundaries and risk mapping

use growth_ref::{Classification, RiskLevel, classify};

#[test]
fn test_exact_cut_points_land_in_the_lower_adjacent_band() {
    // Whole-number z values sit in the band that closes at them
    assert_eq!(classify(-3.0), Classification::Malnutrition);
    assert_eq!(classify(-2.0), Classification::MalnutritionRisk);
    assert_eq!(classify(-1.0), Classification::Normal);
    assert_eq!(classify(1.0), Classification::Normal);
    assert_eq!(classify(2.0), Classification::Overweight);
    assert_eq!(classify(3.0), Classification::Obesity);
}

#[test]
fn test_band_interiors() {
    assert_eq!(classify(-4.5), Classification::SevereMalnutrition);
    assert_eq!(classify(-3.0001), Classification::SevereMalnutrition);
    assert_eq!(classify(-2.5), Classification::Malnutrition);
    assert_eq!(classify(-1.5), Classification::MalnutritionRisk);
    assert_eq!(classify(0.0), Classification::Normal);
    assert_eq!(classify(1.5), Classification::Overweight);
    assert_eq!(classify(2.5), Classification::Obesity);
    assert_eq!(classify(3.0001), Classification::SevereObesity);
    assert_eq!(classify(6.0), Classification::SevereObesity);
}

#[test]
fn test_risk_levels_per_category() {
    assert_eq!(
        Classification::SevereMalnutrition.risk_level(),
        RiskLevel::High
    );
    assert_eq!(Classification::Malnutrition.risk_level(), RiskLevel::High);
    assert_eq!(
        Classification::MalnutritionRisk.risk_level(),
        RiskLevel::Moderate
    );
    assert_eq!(Classification::Normal.risk_level(), RiskLevel::Low);
    assert_eq!(Classification::Overweight.risk_level(), RiskLevel::Moderate);
    assert_eq!(Classification::Obesity.risk_level(), RiskLevel::High);
    assert_eq!(Classification::SevereObesity.risk_level(), RiskLevel::High);
}

#[test]
fn test_classifier_covers_every_category_over_a_sweep() {
    let mut seen = std::collections::HashSet::new();
    let mut z = -6.0;
    while z <= 6.0 {
        seen.insert(classify(z));
        z += 0.125;
    }
    assert_eq!(seen.len(), 7, "sweep should hit every category");
}

#[test]
fn test_stable_labels() {
    assert_eq!(
        Classification::SevereMalnutrition.as_str(),
        "SEVERE_MALNUTRITION"
    );
    assert_eq!(Classification::MalnutritionRisk.as_str(), "MALNUTRITION_RISK");
    assert_eq!(Classification::SevereObesity.as_str(), "SEVERE_OBESITY");
    assert_eq!(RiskLevel::Moderate.as_str(), "MODERATE");
}

#[test]
fn test_labels_survive_serialization() {
    let json = serde_json::to_string(&Classification::Overweight).unwrap();
    assert_eq!(json, "\"OVERWEIGHT\"");
    let json = serde_json::to_string(&RiskLevel::High).unwrap();
    assert_eq!(json, "\"HIGH\"");
}

#[test]
fn test_risk_levels_order_by_urgency() {
    assert!(RiskLevel::Low < RiskLevel::Moderate);
    assert!(RiskLevel::Moderate < RiskLevel::High);
}
