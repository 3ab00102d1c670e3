//! Underwriting Engine Tests
//!
//! These tests validate the loan eligibility decision logic with various
//! collateral/debt scenarios, including the zero-collateral and
//! zero-debt sentinel cases.

use lenda_server::services::risk_engine::{
    calculate_health_factor, calculate_ltv, evaluate_loan_eligibility, Ratio, HEALTH_FACTOR_MIN,
    HEALTH_FACTOR_SAFE, MAX_LTV, RATIO_SENTINEL,
};

// ============================================================================
// Ratio Sentinel Tests
// ============================================================================

#[test]
fn test_ltv_with_zero_collateral_is_infinite() {
    assert_eq!(calculate_ltv(50_000.0, 0.0), Ratio::Infinite);
}

#[test]
fn test_ltv_with_positive_collateral_is_finite() {
    let ltv = calculate_ltv(50_000.0, 200_000.0);
    assert_eq!(ltv, Ratio::Finite(0.25));
}

#[test]
fn test_health_factor_with_zero_debt_is_infinite() {
    assert_eq!(calculate_health_factor(200_000.0, 0.0), Ratio::Infinite);
}

#[test]
fn test_health_factor_with_debt_is_finite() {
    let hf = calculate_health_factor(200_000.0, 100_000.0);
    assert_eq!(hf, Ratio::Finite(2.0));
}

#[test]
fn test_sentinel_constant_is_bounded() {
    // The serialization substitute must be an ordinary, finite number
    assert!(RATIO_SENTINEL.is_finite());
    assert!(RATIO_SENTINEL > MAX_LTV);
}

#[test]
fn test_infinite_serializes_as_sentinel_not_infinity() {
    let json = serde_json::to_value(Ratio::Infinite).unwrap();
    assert_eq!(json.as_f64(), Some(RATIO_SENTINEL));
}

// ============================================================================
// Approval Path Tests
// ============================================================================

#[test]
fn test_first_loan_against_fresh_collateral() {
    // 335,500 of eligible collateral, no debt, requesting 200,000
    let result = evaluate_loan_eligibility(200_000.0, 335_500.0, 0.0);

    assert!(result.approved);
    assert!(result.rejection_reason.is_none());
    assert_eq!(result.max_additional_borrow, 335_500.0);

    let ltv = result.projected_ltv.as_f64().unwrap();
    let hf = result.health_factor.as_f64().unwrap();
    assert!((ltv - 0.5962).abs() < 0.0001);
    assert!((hf - 1.6775).abs() < 0.0001);
}

#[test]
fn test_approval_at_exact_ltv_limit() {
    // Borrowing every unit of collateral value is still within MAX_LTV
    let result = evaluate_loan_eligibility(100_000.0, 100_000.0, 0.0);
    assert!(result.approved);
    assert_eq!(result.projected_ltv, Ratio::Finite(MAX_LTV));
    assert_eq!(result.health_factor, Ratio::Finite(HEALTH_FACTOR_MIN));
}

#[test]
fn test_warning_zone_health_factor_still_approves() {
    // Health factor in [1.0, 1.2) is advisory warning territory, not a gate
    let result = evaluate_loan_eligibility(85_000.0, 100_000.0, 0.0);
    assert!(result.approved);

    let hf = result.health_factor.as_f64().unwrap();
    assert!(hf >= HEALTH_FACTOR_MIN);
    assert!(hf < HEALTH_FACTOR_SAFE);
}

#[test]
fn test_zero_amount_against_zero_debt_yields_infinite_health() {
    let result = evaluate_loan_eligibility(0.0, 50_000.0, 0.0);
    assert!(result.approved);
    assert_eq!(result.health_factor, Ratio::Infinite);
}

// ============================================================================
// Rejection Path Tests
// ============================================================================

#[test]
fn test_no_collateral_always_rejects() {
    for debt in [0.0, 100.0, 1_000_000.0] {
        let result = evaluate_loan_eligibility(10_000.0, 0.0, debt);
        assert!(!result.approved);
        assert_eq!(result.max_additional_borrow, 0.0);
        assert_eq!(result.projected_ltv, Ratio::Infinite);
        assert_eq!(result.health_factor, Ratio::Finite(0.0));
        assert!(result.rejection_reason.is_some());
    }
}

#[test]
fn test_second_loan_exceeding_collateral_rejects() {
    // 335,500 collateral, 200,000 already out, requesting another 200,000:
    // projected debt 400,000 exceeds the collateral
    let result = evaluate_loan_eligibility(200_000.0, 335_500.0, 200_000.0);

    assert!(!result.approved);
    assert_eq!(result.max_additional_borrow, 135_500.0);

    let reason = result.rejection_reason.expect("rejection carries a reason");
    assert!(reason.contains("135500.00"));
}

#[test]
fn test_rejection_reports_projected_ratios() {
    let result = evaluate_loan_eligibility(300_000.0, 200_000.0, 0.0);
    assert!(!result.approved);
    assert_eq!(result.projected_ltv, Ratio::Finite(1.5));

    let hf = result.health_factor.as_f64().unwrap();
    assert!((hf - (200.0 / 300.0)).abs() < 1e-9);
}

// ============================================================================
// Decision Invariants
// ============================================================================

#[test]
fn test_never_approves_above_max_ltv_or_below_min_health() {
    let amounts = [0.0, 1.0, 999.0, 50_000.0, 100_000.0, 500_000.0];
    let collaterals = [0.0, 1.0, 90_000.0, 335_500.0];
    let debts = [0.0, 10.0, 200_000.0];

    for &amount in &amounts {
        for &collateral in &collaterals {
            for &debt in &debts {
                let result = evaluate_loan_eligibility(amount, collateral, debt);
                if result.approved {
                    assert!(!result.projected_ltv.exceeds(MAX_LTV));
                    assert!(!result.health_factor.is_below(HEALTH_FACTOR_MIN));
                }
            }
        }
    }
}

#[test]
fn test_max_additional_borrow_never_negative() {
    let result = evaluate_loan_eligibility(10_000.0, 50_000.0, 80_000.0);
    assert_eq!(result.max_additional_borrow, 0.0);
}

#[test]
fn test_evaluation_echoes_inputs() {
    let result = evaluate_loan_eligibility(42_000.0, 150_000.0, 30_000.0);
    assert_eq!(result.requested_amount, 42_000.0);
    assert_eq!(result.total_eligible_collateral, 150_000.0);
    assert_eq!(result.outstanding_debt, 30_000.0);
}
