//! Error types raised by the engine

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Rejected stock operations
///
/// Automatic depletion never raises these for a shortfall; it reports the
/// unmet quantity instead. Only direct user actions and stale plans fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StockError {
    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    #[error("Total price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("Unit cost of {total_price} over {quantity} is out of range")]
    UnitCostOutOfRange {
        quantity: Decimal,
        total_price: Decimal,
    },

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Lot {lot_id} not found for ingredient {ingredient_id}")]
    LotNotFound { ingredient_id: Uuid, lot_id: Uuid },

    #[error("Lot {lot_id} holds {available}, cannot deduct {requested}")]
    LotChanged {
        lot_id: Uuid,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Depletion planned for ingredient {planned} but applied to {actual}")]
    IngredientMismatch { planned: Uuid, actual: Uuid },
}

/// Reasons an event cannot be completed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    #[error("Event duration must be positive, got {duration_hours} hours")]
    InvalidDuration { duration_hours: Decimal },

    #[error("Completion planned for event {planned} but applied to {actual}")]
    EventMismatch { planned: Uuid, actual: Uuid },

    #[error("Stock changed since completion was planned: {0}")]
    Stock(#[from] StockError),
}
