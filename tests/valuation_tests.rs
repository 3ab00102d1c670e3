//! Valuation Engine Tests
//!
//! Appraisal of stated asset values into eligible collateral, including
//! input normalization and the unknown-type failure mode.

use lenda_server::services::valuation::{appraise, asset_type_config, RiskTier};

// ============================================================================
// Appraisal Tests
// ============================================================================

#[test]
fn test_crypto_appraisal_scenario() {
    let result = appraise("crypto", 75_000.0).unwrap();
    assert_eq!(result.appraised_value, 37_500.0);
    assert_eq!(result.ltv_ratio, 0.50);
    assert_eq!(result.risk_tier, RiskTier::High);
}

#[test]
fn test_property_appraisal() {
    let result = appraise("property", 400_000.0).unwrap();
    assert_eq!(result.appraised_value, 280_000.0);
    assert_eq!(result.ltv_ratio, 0.70);
    assert_eq!(result.risk_tier, RiskTier::Low);
}

#[test]
fn test_car_appraisal() {
    let result = appraise("car", 30_000.0).unwrap();
    assert_eq!(result.appraised_value, 18_000.0);
    assert_eq!(result.ltv_ratio, 0.60);
    assert_eq!(result.risk_tier, RiskTier::Medium);
}

#[test]
fn test_appraisal_matches_configured_ratio() {
    for label in ["car", "crypto", "property"] {
        let config = asset_type_config(label).unwrap();
        let result = appraise(label, 12_345.0).unwrap();
        assert_eq!(result.appraised_value, 12_345.0 * config.ltv_ratio);
    }
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_case_insensitive_lookup() {
    for variant in ["CRYPTO", "Crypto", "cRyPtO"] {
        let result = appraise(variant, 75_000.0).unwrap();
        assert_eq!(result.asset_type, "crypto");
        assert_eq!(result.appraised_value, 37_500.0);
    }
}

#[test]
fn test_whitespace_is_trimmed() {
    let result = appraise("  property\t", 100_000.0).unwrap();
    assert_eq!(result.asset_type, "property");
    assert_eq!(result.appraised_value, 70_000.0);
}

// ============================================================================
// Failure Mode Tests
// ============================================================================

#[test]
fn test_unknown_type_fails_regardless_of_casing() {
    assert!(appraise("boat", 10_000.0).is_err());
    assert!(appraise("BOAT", 10_000.0).is_err());
    assert!(appraise(" Boat ", 10_000.0).is_err());
}

#[test]
fn test_error_enumerates_allowed_types_sorted() {
    let err = appraise("warehouse", 1_000.0).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("warehouse"));
    assert!(message.contains("car, crypto, property"));
}

#[test]
fn test_empty_type_is_rejected() {
    assert!(appraise("", 10_000.0).is_err());
    assert!(appraise("   ", 10_000.0).is_err());
}

// ============================================================================
// Pure-Mapping Semantics
// ============================================================================

#[test]
fn test_no_sign_constraint_inside_the_engine() {
    // Sign validation belongs to the caller; the mapping itself is total
    // over the allowed types
    let result = appraise("car", -5_000.0).unwrap();
    assert_eq!(result.appraised_value, -3_000.0);
}

#[test]
fn test_appraisal_is_deterministic() {
    let first = appraise("crypto", 75_000.0).unwrap();
    let second = appraise("crypto", 75_000.0).unwrap();
    assert_eq!(first.appraised_value, second.appraised_value);
    assert_eq!(first.ltv_ratio, second.ltv_ratio);
}
