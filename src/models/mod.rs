//! Data models for the lending ledger backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod auth;
pub use auth::*;

/// User model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Asset status
///
/// External processes may move an asset to `Locked` or `Rejected` after
/// deposit; the engines only distinguish eligible from not.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "asset_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Locked,
    Rejected,
}

impl AssetStatus {
    /// Statuses counted toward borrowing capacity
    pub fn is_eligible(&self) -> bool {
        matches!(self, AssetStatus::Active | AssetStatus::Locked)
    }
}

/// Deposited asset model
///
/// `appraised_value` and `ltv_ratio` are frozen at deposit time; a later
/// config change does not re-appraise existing rows.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Asset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub asset_type: String,
    pub description: Option<String>,
    pub stated_value: f64,
    pub appraised_value: f64,
    pub ltv_ratio: f64,
    pub status: AssetStatus,
    pub created_at: DateTime<Utc>,
    pub appraised_at: DateTime<Utc>,
}

/// Loan status enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Active,
    Repaid,
    Rejected,
    Liquidated,
}

impl LoanStatus {
    /// Terminal states never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoanStatus::Repaid | LoanStatus::Rejected | LoanStatus::Liquidated
        )
    }

    /// Valid lifecycle moves. A rejected loan can never become active or
    /// repaid. `Liquidated` is reserved: reachable from `Active`, but no
    /// code path in this service performs that transition yet.
    pub fn can_transition_to(&self, next: LoanStatus) -> bool {
        matches!(
            (self, next),
            (LoanStatus::Pending, LoanStatus::Active)
                | (LoanStatus::Pending, LoanStatus::Rejected)
                | (LoanStatus::Active, LoanStatus::Repaid)
                | (LoanStatus::Active, LoanStatus::Liquidated)
        )
    }
}

/// Loan model
///
/// `ltv_at_origination` and `health_factor_snapshot` are captured at
/// decision time and stay null when the decision ratio was the infinite
/// sentinel. Interest accrues from `activated_at`.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Loan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub amount_repaid: f64,
    pub accrued_interest: f64,
    pub interest_rate: f64,
    pub status: LoanStatus,
    pub ltv_at_origination: Option<f64>,
    pub health_factor_snapshot: Option<f64>,
    pub rejection_reason: Option<String>,
    pub collateral_value_locked: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
    pub repaid_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// Principal still owed, never negative
    pub fn principal_remaining(&self) -> f64 {
        (self.amount - self.amount_repaid).max(0.0)
    }
}

/// Request to deposit (or preview) an asset
#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    pub asset_type: String,
    pub stated_value: f64,
    pub description: Option<String>,
}

/// Request to take out (or evaluate) a loan
#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    pub amount: f64,
}

/// Request to repay a single loan
#[derive(Debug, Deserialize)]
pub struct RepayRequest {
    pub amount: f64,
}

/// One entry in a batch repayment request
#[derive(Debug, Deserialize)]
pub struct LoanRepaymentRequest {
    pub loan_id: Uuid,
    pub amount: f64,
}

/// Per-loan outcome of a batch repayment.
///
/// Batch entries are independent units: a failed entry does not roll back
/// repayments already applied to other loans in the same batch.
#[derive(Debug, Serialize)]
pub struct RepaymentOutcome {
    pub loan_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan: Option<Loan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
