//! Position service layer - point-in-time snapshots per user

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Asset, Loan};
use crate::services::position::{compute_position, PositionSnapshot};

/// A user's position snapshot as served by the API
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub position: PositionSnapshot,
}

/// Position service composing assets and loans into snapshots
#[derive(Clone)]
pub struct PositionService {
    db_pool: PgPool,
}

impl PositionService {
    /// Create a new position service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Compute the user's position as of now. Read-only.
    pub async fn snapshot(&self, user_id: Uuid) -> Result<PositionResponse, ApiError> {
        let assets = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.db_pool)
            .await?;

        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.db_pool)
            .await?;

        let position = compute_position(&assets, &loans, Utc::now());

        Ok(PositionResponse { user_id, position })
    }
}
