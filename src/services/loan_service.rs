//! Loan service layer - origination, repayment and underwriting orchestration

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Loan, LoanRepaymentRequest, LoanStatus, RepaymentOutcome};
use crate::services::position::apply_repayment;
use crate::services::risk_engine::{evaluate_loan_eligibility, EvaluationResult};

/// Fixed annual rate applied to every loan at origination
pub const LOAN_INTEREST_RATE: f64 = 0.05;

/// Loan service for managing loan lifecycle
#[derive(Clone)]
pub struct LoanService {
    db_pool: PgPool,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Sum of appraised values over the user's eligible (active or locked)
    /// assets
    async fn total_eligible_collateral(&self, user_id: Uuid) -> Result<f64, ApiError> {
        let total = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT SUM(appraised_value)
            FROM assets
            WHERE user_id = $1 AND status IN ('active', 'locked')
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(total.unwrap_or(0.0))
    }

    /// Remaining principal plus recorded accrued interest over active loans
    async fn total_outstanding_debt(&self, user_id: Uuid) -> Result<f64, ApiError> {
        let total = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT SUM(GREATEST(amount - amount_repaid, 0) + accrued_interest)
            FROM loans
            WHERE user_id = $1 AND status = 'active'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(total.unwrap_or(0.0))
    }

    /// Underwriting dry-run. No database write.
    pub async fn evaluate(&self, user_id: Uuid, amount: f64) -> Result<EvaluationResult, ApiError> {
        let eligible = self.total_eligible_collateral(user_id).await?;
        let debt = self.total_outstanding_debt(user_id).await?;
        Ok(evaluate_loan_eligibility(amount, eligible, debt))
    }

    /// Evaluate a loan request and persist the decided record.
    ///
    /// A loan is born pending and decided immediately: approval persists an
    /// active loan accruing from now, rejection persists a rejected record
    /// carrying the reason. Both are valid outcomes, not errors.
    pub async fn create_loan(&self, user_id: Uuid, amount: f64) -> Result<Loan, ApiError> {
        if amount <= 0.0 {
            return Err(ApiError::ValidationError(
                "loan amount must be positive".to_string(),
            ));
        }

        let eligible = self.total_eligible_collateral(user_id).await?;
        let debt = self.total_outstanding_debt(user_id).await?;
        let result = evaluate_loan_eligibility(amount, eligible, debt);

        let decided = if result.approved {
            LoanStatus::Active
        } else {
            LoanStatus::Rejected
        };

        let now = Utc::now();
        let activated_at = result.approved.then_some(now);

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (
                user_id, amount, interest_rate, status,
                ltv_at_origination, health_factor_snapshot,
                rejection_reason, collateral_value_locked, activated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .bind(LOAN_INTEREST_RATE)
        .bind(decided)
        .bind(result.projected_ltv.as_f64())
        .bind(result.health_factor.as_f64())
        .bind(&result.rejection_reason)
        .bind(eligible)
        .bind(activated_at)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(
            loan_id = %loan.id,
            user_id = %user_id,
            amount = %amount,
            approved = %result.approved,
            "Loan decided"
        );

        Ok(loan)
    }

    /// Get a loan by ID, enforcing ownership.
    ///
    /// A loan owned by someone else is Forbidden, not NotFound: the caller
    /// referenced a real resource it may not act on.
    pub async fn get_loan(&self, loan_id: Uuid, user_id: Uuid) -> Result<Loan, ApiError> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(loan_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Loan not found".to_string()))?;

        if loan.user_id != user_id {
            return Err(ApiError::Forbidden("Not your loan".to_string()));
        }

        Ok(loan)
    }

    /// List a user's loans, newest first
    pub async fn list_loans(&self, user_id: Uuid) -> Result<Vec<Loan>, ApiError> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(loans)
    }

    /// Apply a repayment to a single loan.
    ///
    /// The row is locked for the duration of the transaction so two
    /// concurrent repayments against the same loan serialize instead of
    /// losing an update.
    pub async fn repay(&self, loan_id: Uuid, user_id: Uuid, amount: f64) -> Result<Loan, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let mut loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::NotFound("Loan not found".to_string()))?;

        if loan.user_id != user_id {
            return Err(ApiError::Forbidden("Not your loan".to_string()));
        }

        apply_repayment(&mut loan, amount, Utc::now())?;

        sqlx::query(
            r#"
            UPDATE loans
            SET amount_repaid = $1, accrued_interest = $2, status = $3, repaid_at = $4
            WHERE id = $5
            "#,
        )
        .bind(loan.amount_repaid)
        .bind(loan.accrued_interest)
        .bind(loan.status)
        .bind(loan.repaid_at)
        .bind(loan.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            loan_id = %loan.id,
            amount = %amount,
            status = ?loan.status,
            "Repayment applied"
        );

        Ok(loan)
    }

    /// Repay several loans in one request.
    ///
    /// Each loan is an independent unit in its own transaction; a failure
    /// on one entry never rolls back repayments already applied to the
    /// others. The response reports the outcome per loan.
    pub async fn repay_batch(
        &self,
        user_id: Uuid,
        requests: Vec<LoanRepaymentRequest>,
    ) -> Vec<RepaymentOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = match self.repay(request.loan_id, user_id, request.amount).await {
                Ok(loan) => RepaymentOutcome {
                    loan_id: request.loan_id,
                    success: true,
                    loan: Some(loan),
                    error: None,
                },
                Err(e) => RepaymentOutcome {
                    loan_id: request.loan_id,
                    success: false,
                    loan: None,
                    error: Some(e.to_string()),
                },
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}
