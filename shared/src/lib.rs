//! Shared types and the costing engine for the Bar Costing Platform
//!
//! This crate turns drink recipes, consumption-rate assumptions, guest counts
//! and event duration into ingredient usage, cost and price, and depletes
//! lot-tracked stock oldest-first. It is shared between the backend and the
//! browser (via WASM) and performs no I/O.

pub mod depletion;
pub mod error;
pub mod models;
pub mod pricing;
pub mod projection;
pub mod reconciler;
pub mod types;
pub mod validation;
pub mod valuation;

pub use depletion::*;
pub use error::*;
pub use models::*;
pub use pricing::*;
pub use projection::*;
pub use reconciler::*;
pub use types::*;
pub use validation::*;
pub use valuation::*;
