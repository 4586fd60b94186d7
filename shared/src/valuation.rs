//! Inventory valuation over purchase lots
//!
//! The single source of truth for what one unit of an ingredient costs right
//! now. Always recomputed from the lots; nothing here is cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Ingredient, Unit};
use crate::types::{saturating_div, saturating_sum};

/// Current stock position of an ingredient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct StockValuation {
    pub total_stock: Decimal,
    /// Weighted by remaining quantity; zero when out of stock
    pub avg_unit_cost: Decimal,
    pub total_value: Decimal,
}

/// Value an ingredient's remaining stock
pub fn valuate(ingredient: &Ingredient) -> StockValuation {
    let total_stock = ingredient.total_stock();
    let total_value = saturating_sum(ingredient.lots.iter().map(|lot| lot.remaining_value()));
    let avg_unit_cost = if total_stock > Decimal::ZERO {
        saturating_div(total_value, total_stock)
    } else {
        Decimal::ZERO
    };

    StockValuation {
        total_stock,
        avg_unit_cost,
        total_value,
    }
}

/// True when a positive threshold is set and stock is strictly below it
pub fn is_low_stock(ingredient: &Ingredient) -> bool {
    match ingredient.low_stock_threshold {
        Some(threshold) if threshold > Decimal::ZERO => ingredient.total_stock() < threshold,
        _ => false,
    }
}

/// An ingredient that has fallen below its threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowStockAlert {
    pub ingredient_id: Uuid,
    pub name: String,
    pub unit: Unit,
    pub total_stock: Decimal,
    pub threshold: Decimal,
}

pub fn low_stock_alerts<'a, I>(ingredients: I) -> Vec<LowStockAlert>
where
    I: IntoIterator<Item = &'a Ingredient>,
{
    ingredients
        .into_iter()
        .filter(|ingredient| is_low_stock(ingredient))
        .map(|ingredient| LowStockAlert {
            ingredient_id: ingredient.id,
            name: ingredient.name.clone(),
            unit: ingredient.unit,
            total_stock: ingredient.total_stock(),
            threshold: ingredient.low_stock_threshold.unwrap_or(Decimal::ZERO),
        })
        .collect()
}
