//! Business logic for the lending ledger.
//!
//! The pure engines (`valuation`, `risk_engine`, `position`) take resolved
//! values and perform no I/O; the `*_service` modules own the database
//! access and feed them.

pub mod asset_service;
pub mod loan_service;
pub mod position;
pub mod position_service;
pub mod risk_engine;
pub mod valuation;

pub use asset_service::AssetService;
pub use loan_service::LoanService;
pub use position_service::PositionService;
