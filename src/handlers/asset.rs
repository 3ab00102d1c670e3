//! Asset deposit and valuation API handlers

use axum::{extract::State, Json};

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{Asset, CreateAssetRequest};
use crate::services::valuation::ValuationResult;
use crate::state::AppState;

/// POST /api/assets - Deposit an asset for the authenticated user
pub async fn create_asset(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateAssetRequest>,
) -> Result<Json<Asset>, ApiError> {
    let asset = state.asset_service.create_asset(user.user_id, req).await?;

    Ok(Json(asset))
}

/// GET /api/assets - List the authenticated user's assets
pub async fn list_assets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Asset>>, ApiError> {
    let assets = state.asset_service.list_assets(user.user_id).await?;

    Ok(Json(assets))
}

/// POST /api/assets/preview - Dry-run appraisal, nothing persisted
pub async fn preview_asset(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(req): Json<CreateAssetRequest>,
) -> Result<Json<ValuationResult>, ApiError> {
    let valuation = state
        .asset_service
        .preview(&req.asset_type, req.stated_value)?;

    Ok(Json(valuation))
}
