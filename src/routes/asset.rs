//! Asset route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::asset;
use crate::state::AppState;

pub fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/api/assets", post(asset::create_asset))
        .route("/api/assets", get(asset::list_assets))
        .route("/api/assets/preview", post(asset::preview_asset))
}
