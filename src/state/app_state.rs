//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::AuthService;
use crate::services::{AssetService, LoanService, PositionService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub asset_service: Arc<AssetService>,
    pub loan_service: Arc<LoanService>,
    pub position_service: Arc<PositionService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        asset_service: Arc<AssetService>,
        loan_service: Arc<LoanService>,
        position_service: Arc<PositionService>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            asset_service,
            loan_service,
            position_service,
            auth_service,
        }
    }
}

impl FromRef<AppState> for Arc<AssetService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.asset_service.clone()
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<PositionService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.position_service.clone()
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}
