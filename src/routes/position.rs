//! Position route definitions

use axum::{routing::get, Router};

use crate::handlers::position;
use crate::state::AppState;

pub fn position_routes() -> Router<AppState> {
    Router::new().route("/api/positions/me", get(position::get_position))
}
