//! Position dashboard API handlers

use axum::{extract::State, Json};

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::services::position_service::PositionResponse;
use crate::state::AppState;

/// GET /api/positions/me - Point-in-time snapshot for the authenticated user
pub async fn get_position(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<PositionResponse>, ApiError> {
    let snapshot = state.position_service.snapshot(user.user_id).await?;

    Ok(Json(snapshot))
}
