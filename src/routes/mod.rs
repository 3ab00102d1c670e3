//! Route definitions for the lending ledger API

mod asset;
mod auth;
mod loan;
mod position;
mod user;

pub use asset::asset_routes;
pub use auth::auth_routes;
pub use loan::loan_routes;
pub use position::position_routes;
pub use user::user_routes;
