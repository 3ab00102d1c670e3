//! Loan underwriting engine.
//!
//! Pure calculation layer, no database access. Inputs are already-resolved
//! totals (eligible collateral, outstanding debt), not rows, which keeps
//! every decision testable without a pool. Callers decide what to do with
//! the result: persist an active loan on approval, a rejected loan record
//! carrying the reason on rejection.

use serde::{Serialize, Serializer};

// ============================================================================
// Underwriting Constants
// ============================================================================

/// Debt may never exceed 100% of eligible collateral
pub const MAX_LTV: f64 = 1.0;

/// Minimum projected health factor for approval
pub const HEALTH_FACTOR_MIN: f64 = 1.0;

/// Health factors at or above this are considered safe; between
/// HEALTH_FACTOR_MIN and this value is a warning zone. Advisory only,
/// never a hard gate.
pub const HEALTH_FACTOR_SAFE: f64 = 1.2;

/// Bounded stand-in for an infinite ratio at the serialization edge
pub const RATIO_SENTINEL: f64 = 999.0;

// ============================================================================
// Ratio
// ============================================================================

/// An LTV or health-factor value.
///
/// Zero collateral (LTV) or zero debt (health factor) make the ratio
/// undefined; that case is a tagged variant rather than an `f64::INFINITY`
/// flowing through arithmetic. `Infinite` serializes as [`RATIO_SENTINEL`]
/// so JSON consumers always see a bounded number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Finite(f64),
    Infinite,
}

impl Ratio {
    /// The finite value, or `None` for the infinite sentinel
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Ratio::Finite(v) => Some(*v),
            Ratio::Infinite => None,
        }
    }

    /// True when the ratio is strictly above `limit`. Infinite exceeds
    /// every limit.
    pub fn exceeds(&self, limit: f64) -> bool {
        match self {
            Ratio::Finite(v) => *v > limit,
            Ratio::Infinite => true,
        }
    }

    /// True when the ratio is strictly below `limit`. Infinite is below
    /// nothing.
    pub fn is_below(&self, limit: f64) -> bool {
        match self {
            Ratio::Finite(v) => *v < limit,
            Ratio::Infinite => false,
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Ratio::Finite(v) => serializer.serialize_f64(*v),
            Ratio::Infinite => serializer.serialize_f64(RATIO_SENTINEL),
        }
    }
}

/// loan-to-value: outstanding debt over eligible collateral
pub fn calculate_ltv(outstanding_debt: f64, eligible_collateral: f64) -> Ratio {
    if eligible_collateral <= 0.0 {
        return Ratio::Infinite;
    }
    Ratio::Finite(outstanding_debt / eligible_collateral)
}

/// health factor: eligible collateral over outstanding debt.
/// Above 1.0 is solvent, below 1.0 is liquidation territory.
pub fn calculate_health_factor(
    total_eligible_collateral: f64,
    total_outstanding_debt: f64,
) -> Ratio {
    if total_outstanding_debt <= 0.0 {
        return Ratio::Infinite;
    }
    Ratio::Finite(total_eligible_collateral / total_outstanding_debt)
}

// ============================================================================
// Evaluation
// ============================================================================

/// Outcome of a single loan evaluation. Ephemeral, produced fresh per call,
/// never persisted as-is.
#[derive(Debug, Serialize, Clone)]
pub struct EvaluationResult {
    pub approved: bool,
    pub requested_amount: f64,
    pub projected_ltv: Ratio,
    pub health_factor: Ratio,
    pub total_eligible_collateral: f64,
    pub outstanding_debt: f64,
    pub max_additional_borrow: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Decide whether a loan of `requested_amount` should be approved.
///
/// Rules, in order:
/// - eligible collateral must be > 0 (checked before any ratio, so a zero
///   denominator never reaches the division)
/// - projected LTV (debt after the loan / eligible collateral) must be
///   at most [`MAX_LTV`]
/// - projected health factor must be at least [`HEALTH_FACTOR_MIN`]
///
/// A rejection is a normal decision outcome, not an error.
pub fn evaluate_loan_eligibility(
    requested_amount: f64,
    total_eligible_collateral: f64,
    total_outstanding_debt: f64,
) -> EvaluationResult {
    let max_additional = (total_eligible_collateral - total_outstanding_debt).max(0.0);

    // No collateral at all
    if total_eligible_collateral <= 0.0 {
        return EvaluationResult {
            approved: false,
            requested_amount,
            projected_ltv: Ratio::Infinite,
            health_factor: Ratio::Finite(0.0),
            total_eligible_collateral: 0.0,
            outstanding_debt: total_outstanding_debt,
            max_additional_borrow: 0.0,
            rejection_reason: Some("No eligible collateral. Deposit assets first.".to_string()),
        };
    }

    let projected_debt = total_outstanding_debt + requested_amount;
    let projected_ltv = calculate_ltv(projected_debt, total_eligible_collateral);
    let health_factor = calculate_health_factor(total_eligible_collateral, projected_debt);

    if projected_ltv.exceeds(MAX_LTV) {
        return EvaluationResult {
            approved: false,
            requested_amount,
            projected_ltv,
            health_factor,
            total_eligible_collateral,
            outstanding_debt: total_outstanding_debt,
            max_additional_borrow: max_additional,
            rejection_reason: Some(format!(
                "Loan exceeds eligible collateral. Maximum additional borrow: {:.2}",
                max_additional
            )),
        };
    }

    if health_factor.is_below(HEALTH_FACTOR_MIN) {
        return EvaluationResult {
            approved: false,
            requested_amount,
            projected_ltv,
            health_factor,
            total_eligible_collateral,
            outstanding_debt: total_outstanding_debt,
            max_additional_borrow: max_additional,
            rejection_reason: Some(
                "Health factor would fall below minimum. Reduce amount or add collateral."
                    .to_string(),
            ),
        };
    }

    EvaluationResult {
        approved: true,
        requested_amount,
        projected_ltv,
        health_factor,
        total_eligible_collateral,
        outstanding_debt: total_outstanding_debt,
        max_additional_borrow: max_additional,
        rejection_reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ltv_zero_collateral_is_infinite() {
        assert_eq!(calculate_ltv(100.0, 0.0), Ratio::Infinite);
        assert_eq!(calculate_ltv(0.0, -5.0), Ratio::Infinite);
    }

    #[test]
    fn test_health_factor_zero_debt_is_infinite() {
        assert_eq!(calculate_health_factor(1_000.0, 0.0), Ratio::Infinite);
    }

    #[test]
    fn test_ratio_comparisons() {
        assert!(Ratio::Infinite.exceeds(MAX_LTV));
        assert!(!Ratio::Infinite.is_below(HEALTH_FACTOR_MIN));
        assert!(Ratio::Finite(1.01).exceeds(MAX_LTV));
        assert!(!Ratio::Finite(1.0).exceeds(MAX_LTV));
        assert!(Ratio::Finite(0.99).is_below(HEALTH_FACTOR_MIN));
        assert!(!Ratio::Finite(1.0).is_below(HEALTH_FACTOR_MIN));
    }

    #[test]
    fn test_infinite_ratio_serializes_as_sentinel() {
        let json = serde_json::to_string(&Ratio::Infinite).unwrap();
        assert_eq!(json, "999.0");
    }

    #[test]
    fn test_approval_within_limits() {
        let result = evaluate_loan_eligibility(200_000.0, 335_500.0, 0.0);
        assert!(result.approved);
        assert!(result.rejection_reason.is_none());
        let ltv = result.projected_ltv.as_f64().unwrap();
        let hf = result.health_factor.as_f64().unwrap();
        assert!((ltv - 0.5962).abs() < 0.0001);
        assert!((hf - 1.6775).abs() < 0.0001);
        assert_eq!(result.max_additional_borrow, 335_500.0);
    }

    #[test]
    fn test_rejection_when_projected_debt_exceeds_collateral() {
        let result = evaluate_loan_eligibility(200_000.0, 335_500.0, 200_000.0);
        assert!(!result.approved);
        assert_eq!(result.max_additional_borrow, 135_500.0);
        let reason = result.rejection_reason.unwrap();
        assert!(reason.contains("135500.00"));
    }

    #[test]
    fn test_rejection_with_no_collateral() {
        let result = evaluate_loan_eligibility(50_000.0, 0.0, 10_000.0);
        assert!(!result.approved);
        assert_eq!(result.projected_ltv, Ratio::Infinite);
        assert_eq!(result.health_factor, Ratio::Finite(0.0));
        assert_eq!(result.max_additional_borrow, 0.0);
    }

    #[test]
    fn test_zero_amount_request_against_zero_debt() {
        // projected debt is 0, so health factor is the infinite sentinel
        let result = evaluate_loan_eligibility(0.0, 10_000.0, 0.0);
        assert!(result.approved);
        assert_eq!(result.health_factor, Ratio::Infinite);
        assert_eq!(result.projected_ltv, Ratio::Finite(0.0));
    }

    #[test]
    fn test_borrow_up_to_exact_limit_is_approved() {
        // LTV of exactly 1.0 and health factor of exactly 1.0 pass both gates
        let result = evaluate_loan_eligibility(100_000.0, 100_000.0, 0.0);
        assert!(result.approved);
        assert_eq!(result.projected_ltv, Ratio::Finite(1.0));
        assert_eq!(result.health_factor, Ratio::Finite(1.0));
    }

    #[test]
    fn test_safe_threshold_is_advisory_only() {
        // Health factor in the warning zone [1.0, 1.2) still approves
        let result = evaluate_loan_eligibility(90_000.0, 100_000.0, 0.0);
        assert!(result.approved);
        let hf = result.health_factor.as_f64().unwrap();
        assert!(hf >= HEALTH_FACTOR_MIN && hf < HEALTH_FACTOR_SAFE);
    }
}
