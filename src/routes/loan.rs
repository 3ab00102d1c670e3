//! Loan route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::loan;
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/loans", post(loan::create_loan))
        .route("/api/loans", get(loan::list_loans))
        .route("/api/loans/evaluate", post(loan::evaluate_loan))
        .route("/api/loans/repay/batch", post(loan::repay_batch))
        .route("/api/loans/:id", get(loan::get_loan))
        .route("/api/loans/:id/repay", post(loan::repay_loan))
}
