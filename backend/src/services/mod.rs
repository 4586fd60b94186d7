//! Business logic services for the Bar Costing Platform

pub mod catalog;
pub mod event;
pub mod inventory;
pub mod simulation;

pub use catalog::CatalogService;
pub use event::EventService;
pub use inventory::InventoryService;
pub use simulation::SimulationService;
