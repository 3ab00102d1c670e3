//! Position aggregation and interest accrual.
//!
//! Pure layer over resolved `Asset`/`Loan` records: simple daily interest
//! accrual, the interest-first repayment waterfall, and the point-in-time
//! position snapshot. Nothing here touches storage; `apply_repayment` is
//! the single mutating operation in the core and callers are responsible
//! for applying it atomically per loan.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::{Asset, Loan, LoanStatus};
use crate::services::risk_engine::{calculate_health_factor, calculate_ltv};

/// Flat assumed annual yield on deposited value. Advisory figure only.
pub const YIELD_RATE: f64 = 0.05;

const DAYS_PER_YEAR: f64 = 365.0;

/// Repayment errors
#[derive(Error, Debug)]
pub enum RepaymentError {
    #[error("only active loans can be repaid")]
    NotRepayable,

    #[error("repayment amount must be positive")]
    InvalidAmount,

    #[error("repayment exceeds remaining debt (total outstanding: {outstanding:.2})")]
    Overpayment { outstanding: f64 },
}

/// Simple interest accrued since activation.
///
/// `remaining_principal * rate * (whole_days / 365)`, with elapsed time
/// truncated to whole days. Returns 0 for loans that were never activated.
pub fn compute_accrued_interest(loan: &Loan, now: DateTime<Utc>) -> f64 {
    let Some(activated_at) = loan.activated_at else {
        return 0.0;
    };
    let days = (now - activated_at).num_days().max(0);
    loan.principal_remaining() * loan.interest_rate * (days as f64 / DAYS_PER_YEAR)
}

/// Apply a repayment to a loan, interest before principal.
///
/// Accrued interest is refreshed as of `now` first. A payment within the
/// accrued interest reduces only the interest; any remainder beyond it pays
/// down principal. A remainder larger than the remaining principal fails
/// with [`RepaymentError::Overpayment`] and leaves the loan untouched.
/// When principal and interest both clear, the loan transitions to
/// `Repaid` and `repaid_at` is stamped.
pub fn apply_repayment(
    loan: &mut Loan,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<(), RepaymentError> {
    if loan.status != LoanStatus::Active {
        return Err(RepaymentError::NotRepayable);
    }
    if amount <= 0.0 {
        return Err(RepaymentError::InvalidAmount);
    }

    let accrued = compute_accrued_interest(loan, now);

    if amount <= accrued {
        loan.accrued_interest = accrued - amount;
    } else {
        let remainder = amount - accrued;
        let principal_remaining = loan.principal_remaining();
        if remainder > principal_remaining {
            // Outstanding total reported from the pre-payment state
            return Err(RepaymentError::Overpayment {
                outstanding: principal_remaining + accrued,
            });
        }
        loan.accrued_interest = 0.0;
        loan.amount_repaid += remainder;
    }

    if loan.amount_repaid >= loan.amount
        && loan.accrued_interest <= 0.0
        && loan.status.can_transition_to(LoanStatus::Repaid)
    {
        loan.status = LoanStatus::Repaid;
        loan.repaid_at = Some(now);
    }

    Ok(())
}

/// Point-in-time aggregate of a user's assets and loans. Computed on
/// demand, never persisted.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PositionSnapshot {
    /// Sum of stated values over all assets, any status
    pub total_deposited: f64,

    /// Sum of appraised values over active and locked assets
    pub total_eligible_collateral: f64,

    /// Remaining principal across active loans
    pub total_borrowed: f64,

    /// Accrued interest across active loans, as of the snapshot instant
    pub total_interest: f64,

    /// Collateral headroom: eligible collateral minus total debt, floored at 0
    pub available_credit: f64,

    /// Assumed deposit yield minus interest expense. Advisory only.
    pub yield_earned: f64,

    /// Collateral over debt; absent when there is no debt
    pub health_factor: Option<f64>,

    /// Debt over collateral; absent when either side is zero
    pub ltv: Option<f64>,
}

/// Aggregate a user's records into a snapshot as of `now`.
///
/// Idempotent for identical inputs and the same `now`; no record is
/// mutated.
pub fn compute_position(assets: &[Asset], loans: &[Loan], now: DateTime<Utc>) -> PositionSnapshot {
    let total_deposited: f64 = assets.iter().map(|a| a.stated_value).sum();
    let eligible: f64 = assets
        .iter()
        .filter(|a| a.status.is_eligible())
        .map(|a| a.appraised_value)
        .sum();

    let active_loans: Vec<&Loan> = loans
        .iter()
        .filter(|l| l.status == LoanStatus::Active)
        .collect();

    let total_principal: f64 = active_loans.iter().map(|l| l.principal_remaining()).sum();
    let total_interest: f64 = active_loans
        .iter()
        .map(|l| compute_accrued_interest(l, now))
        .sum();

    let total_debt = total_principal + total_interest;
    let available_credit = (eligible - total_debt).max(0.0);

    let gross_yield = total_deposited * YIELD_RATE;
    let yield_earned = gross_yield - total_interest;

    let health_factor = if total_debt > 0.0 {
        calculate_health_factor(eligible, total_debt).as_f64()
    } else {
        None
    };
    let ltv = if eligible > 0.0 && total_debt > 0.0 {
        calculate_ltv(total_debt, eligible).as_f64()
    } else {
        None
    };

    PositionSnapshot {
        total_deposited,
        total_eligible_collateral: eligible,
        total_borrowed: total_principal,
        total_interest,
        available_credit,
        yield_earned,
        health_factor,
        ltv,
    }
}
