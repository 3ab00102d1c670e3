//! Middleware for the lending ledger API
//!
//! Request tracing and authentication extraction.

pub mod auth;
mod tracing;

pub use auth::AuthenticatedUser;
pub use tracing::request_tracing;
