//! Loan origination and repayment API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{Loan, LoanRepaymentRequest, LoanRequest, RepayRequest, RepaymentOutcome};
use crate::services::risk_engine::EvaluationResult;
use crate::state::AppState;

/// POST /api/loans - Request a loan; the decision is persisted either way
pub async fn create_loan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<LoanRequest>,
) -> Result<Json<Loan>, ApiError> {
    let loan = state
        .loan_service
        .create_loan(user.user_id, req.amount)
        .await?;

    Ok(Json(loan))
}

/// POST /api/loans/evaluate - Underwriting dry-run, nothing persisted
pub async fn evaluate_loan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<LoanRequest>,
) -> Result<Json<EvaluationResult>, ApiError> {
    let result = state.loan_service.evaluate(user.user_id, req.amount).await?;

    Ok(Json(result))
}

/// GET /api/loans - List the authenticated user's loans
pub async fn list_loans(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Loan>>, ApiError> {
    let loans = state.loan_service.list_loans(user.user_id).await?;

    Ok(Json(loans))
}

/// GET /api/loans/:id - Get one of the authenticated user's loans
pub async fn get_loan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(loan_id): Path<Uuid>,
) -> Result<Json<Loan>, ApiError> {
    let loan = state.loan_service.get_loan(loan_id, user.user_id).await?;

    Ok(Json(loan))
}

/// POST /api/loans/:id/repay - Repay a loan partially or fully
pub async fn repay_loan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(loan_id): Path<Uuid>,
    Json(req): Json<RepayRequest>,
) -> Result<Json<Loan>, ApiError> {
    let loan = state
        .loan_service
        .repay(loan_id, user.user_id, req.amount)
        .await?;

    Ok(Json(loan))
}

/// POST /api/loans/repay/batch - Repay multiple loans in a single request.
///
/// Entries are independent; the response reports a per-loan outcome and a
/// failed entry leaves the successes before it committed.
pub async fn repay_batch(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(requests): Json<Vec<LoanRepaymentRequest>>,
) -> Result<Json<Vec<RepaymentOutcome>>, ApiError> {
    let outcomes = state.loan_service.repay_batch(user.user_id, requests).await;

    Ok(Json(outcomes))
}
