//! Climate Monitor backend
//!
//! Yield prediction, climate classification, soil analysis and farm
//! economics over read-only farm snapshots.

pub mod config;
pub mod error;
pub mod services;
pub mod snapshot;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use snapshot::FarmSnapshot;
