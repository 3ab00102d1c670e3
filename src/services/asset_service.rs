//! Asset service layer - deposit and appraisal orchestration

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Asset, AssetStatus, CreateAssetRequest};
use crate::services::valuation::{appraise, ValuationResult};

/// Asset service for deposits and valuation previews
#[derive(Clone)]
pub struct AssetService {
    db_pool: PgPool,
}

impl AssetService {
    /// Create a new asset service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Valuation dry-run. No database write.
    ///
    /// Validation of the stated value happens here, on the caller side of
    /// the valuation engine: the engine itself is a pure mapping.
    pub fn preview(&self, asset_type: &str, stated_value: f64) -> Result<ValuationResult, ApiError> {
        if stated_value <= 0.0 {
            return Err(ApiError::ValidationError(
                "asset value must be positive".to_string(),
            ));
        }
        Ok(appraise(asset_type, stated_value)?)
    }

    /// Appraise and persist a deposited asset for a user.
    ///
    /// The appraised value and LTV ratio are frozen on the row at deposit
    /// time.
    pub async fn create_asset(
        &self,
        user_id: Uuid,
        request: CreateAssetRequest,
    ) -> Result<Asset, ApiError> {
        let valuation = self.preview(&request.asset_type, request.stated_value)?;

        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                user_id, asset_type, description,
                stated_value, appraised_value, ltv_ratio, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&valuation.asset_type)
        .bind(&request.description)
        .bind(request.stated_value)
        .bind(valuation.appraised_value)
        .bind(valuation.ltv_ratio)
        .bind(AssetStatus::Active)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(
            asset_id = %asset.id,
            user_id = %user_id,
            asset_type = %asset.asset_type,
            appraised_value = %asset.appraised_value,
            "Asset deposited"
        );

        Ok(asset)
    }

    /// List a user's assets, newest first
    pub async fn list_assets(&self, user_id: Uuid) -> Result<Vec<Asset>, ApiError> {
        let assets = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(assets)
    }
}
