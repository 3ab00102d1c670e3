//! Authentication HTTP handlers
//!
//! Endpoints for account registration and email/password login.

use axum::{extract::State, Json};
use validator::Validate;

use super::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{AuthTokenResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::state::AppState;

/// POST /auth/register - Create an account and issue a token
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthTokenResponse>, ApiError> {
    req.validate()?;

    let tokens = state
        .auth_service
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok(Json(tokens))
}

/// POST /auth/login - Verify credentials and issue a token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthTokenResponse>, ApiError> {
    req.validate()?;

    let tokens = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(tokens))
}

/// GET /auth/me - Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth_service.get_user_by_id(user.user_id).await?;

    Ok(Json(user.into()))
}
