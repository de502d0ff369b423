//! Shared types and models for the Climate Monitor platform
//!
//! This crate contains the farm records and the pure classification tables
//! shared between the backend scoring services and the client-side (WASM)
//! build.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
