//! HTTP handlers for the Bar Costing Platform API

pub mod catalog;
pub mod event;
pub mod health;
pub mod inventory;
pub mod simulation;

pub use catalog::*;
pub use event::*;
pub use health::*;
pub use inventory::*;
pub use simulation::*;
