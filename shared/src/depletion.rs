//! FIFO depletion of purchase lots
//!
//! Depletion is two-phase: [`plan_depletion`] works out which lots give up how
//! much without touching anything, and [`DepletionPlan::apply`] checks the plan
//! still fits the ingredient before mutating any lot. A caller can wrap the
//! apply step in whatever transaction its store offers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StockError;
use crate::models::{Ingredient, PurchaseLot};
use crate::types::saturating_sum;

/// Quantity taken from one lot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LotDeduction {
    pub lot_id: Uuid,
    pub quantity: Decimal,
}

/// Deductions for one ingredient, oldest lot first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepletionPlan {
    pub ingredient_id: Uuid,
    pub requested: Decimal,
    pub deductions: Vec<LotDeduction>,
    /// Part of the request no lot could cover
    pub shortfall: Decimal,
}

impl DepletionPlan {
    pub fn deducted(&self) -> Decimal {
        saturating_sum(self.deductions.iter().map(|d| d.quantity))
    }

    pub fn has_shortfall(&self) -> bool {
        self.shortfall > Decimal::ZERO
    }

    /// Check every deduction still fits the ingredient's lots
    pub fn validate(&self, ingredient: &Ingredient) -> Result<(), StockError> {
        if ingredient.id != self.ingredient_id {
            return Err(StockError::IngredientMismatch {
                planned: self.ingredient_id,
                actual: ingredient.id,
            });
        }

        let mut per_lot: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for deduction in &self.deductions {
            let total = per_lot.entry(deduction.lot_id).or_insert(Decimal::ZERO);
            *total = total.saturating_add(deduction.quantity);
        }

        for (lot_id, requested) in per_lot {
            let lot = ingredient.lot(&lot_id).ok_or(StockError::LotNotFound {
                ingredient_id: ingredient.id,
                lot_id,
            })?;
            if lot.remaining_quantity < requested {
                return Err(StockError::LotChanged {
                    lot_id,
                    requested,
                    available: lot.remaining_quantity,
                });
            }
        }

        Ok(())
    }

    /// Apply the plan; nothing is mutated unless every deduction fits
    pub fn apply(&self, ingredient: &mut Ingredient) -> Result<(), StockError> {
        self.validate(ingredient)?;
        apply_deductions(ingredient, &self.deductions);
        Ok(())
    }

    /// Lots as they would look after applying the plan
    pub fn preview(&self, ingredient: &Ingredient) -> Vec<PurchaseLot> {
        let mut preview = ingredient.clone();
        apply_deductions(&mut preview, &self.deductions);
        preview.lots
    }
}

fn apply_deductions(ingredient: &mut Ingredient, deductions: &[LotDeduction]) {
    for deduction in deductions {
        if let Some(lot) = ingredient.lots.iter_mut().find(|lot| lot.id == deduction.lot_id) {
            lot.remaining_quantity -= deduction.quantity;
        }
    }
}

/// Work out which lots cover `required`, oldest purchase first
///
/// Never plans below zero on any lot. Whatever the lots cannot cover is
/// returned as the shortfall. A non-positive request plans nothing.
pub fn plan_depletion(ingredient: &Ingredient, required: Decimal) -> DepletionPlan {
    let mut outstanding = required.max(Decimal::ZERO);
    let mut deductions = Vec::new();

    for lot in ingredient.lots_oldest_first() {
        if outstanding <= Decimal::ZERO {
            break;
        }
        if lot.is_exhausted() {
            continue;
        }
        let quantity = outstanding.min(lot.remaining_quantity);
        deductions.push(LotDeduction {
            lot_id: lot.id,
            quantity,
        });
        outstanding -= quantity;
    }

    DepletionPlan {
        ingredient_id: ingredient.id,
        requested: required,
        deductions,
        shortfall: outstanding,
    }
}

/// Deplete `required` from the ingredient's lots in place
///
/// A shortfall is not an error: every lot ends at zero and the plan reports
/// the unmet quantity.
pub fn deplete(ingredient: &mut Ingredient, required: Decimal) -> DepletionPlan {
    let plan = plan_depletion(ingredient, required);
    apply_deductions(ingredient, &plan.deductions);

    if plan.has_shortfall() {
        tracing::warn!(
            "Stock shortfall for ingredient {} ({}): requested {}, short by {}",
            ingredient.name,
            ingredient.id,
            required,
            plan.shortfall
        );
    } else {
        tracing::debug!(
            "Depleted {} {} of {} across {} lots",
            plan.deducted(),
            ingredient.unit,
            ingredient.name,
            plan.deductions.len()
        );
    }

    plan
}

/// Why stock was removed by hand
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    Loss,
    Breakage,
    #[default]
    Correction,
    Other,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Loss => "loss",
            AdjustmentReason::Breakage => "breakage",
            AdjustmentReason::Correction => "correction",
            AdjustmentReason::Other => "other",
        }
    }
}

/// A manual removal of stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAdjustment {
    pub quantity: Decimal,
    #[serde(default)]
    pub reason: AdjustmentReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StockAdjustment {
    pub fn new(quantity: Decimal, reason: AdjustmentReason) -> Self {
        Self {
            quantity,
            reason,
            note: None,
        }
    }
}

/// Remove stock by hand, oldest lot first
///
/// Unlike event depletion this must be fully covered: a request above the
/// current total stock is rejected before any lot is touched.
pub fn adjust_stock(
    ingredient: &mut Ingredient,
    adjustment: &StockAdjustment,
) -> Result<DepletionPlan, StockError> {
    if adjustment.quantity <= Decimal::ZERO {
        return Err(StockError::NonPositiveQuantity(adjustment.quantity));
    }

    let available = ingredient.total_stock();
    if adjustment.quantity > available {
        return Err(StockError::InsufficientStock {
            requested: adjustment.quantity,
            available,
        });
    }

    let plan = plan_depletion(ingredient, adjustment.quantity);
    plan.apply(ingredient)?;

    tracing::info!(
        "Adjusted {} ({}) by -{} {} for {}",
        ingredient.name,
        ingredient.id,
        adjustment.quantity,
        ingredient.unit,
        adjustment.reason.as_str()
    );

    Ok(plan)
}

/// A purchase being booked into stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLot {
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub total_price: Decimal,
}

/// Book a new purchase lot onto the ingredient
pub fn receive_lot(ingredient: &mut Ingredient, new_lot: NewLot) -> Result<&PurchaseLot, StockError> {
    if new_lot.quantity <= Decimal::ZERO {
        return Err(StockError::NonPositiveQuantity(new_lot.quantity));
    }
    if new_lot.total_price <= Decimal::ZERO {
        return Err(StockError::NonPositivePrice(new_lot.total_price));
    }
    if new_lot.total_price.checked_div(new_lot.quantity).is_none() {
        return Err(StockError::UnitCostOutOfRange {
            quantity: new_lot.quantity,
            total_price: new_lot.total_price,
        });
    }

    ingredient
        .lots
        .push(PurchaseLot::new(new_lot.date, new_lot.quantity, new_lot.total_price));

    tracing::info!(
        "Received {} {} of {} for {}",
        new_lot.quantity,
        ingredient.unit,
        ingredient.name,
        new_lot.total_price
    );

    let index = ingredient.lots.len() - 1;
    Ok(&ingredient.lots[index])
}
