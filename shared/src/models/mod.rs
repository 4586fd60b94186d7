//! Domain models for the Bar Costing Platform

mod catalog;
mod drink;
mod event;
mod ingredient;

pub use catalog::*;
pub use drink::*;
pub use event::*;
pub use ingredient::*;
