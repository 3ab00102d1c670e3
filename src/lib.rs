//! Lenda backend library
//!
//! Collateralized-lending ledger: users deposit valued assets, borrow
//! against the appraised collateral, and repay with accruing interest.
//! The valuation, underwriting and position engines live under
//! [`services`]; everything else is the HTTP and persistence plumbing
//! around them.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
