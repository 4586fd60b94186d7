//! Cost aggregation and pricing
//!
//! Profit is charged on ingredient cost only. Staff cost passes through to the
//! final price without markup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Catalog, Drink, IngredientLookup, StaffMember};
use crate::projection::{project_event, EventProjection};
use crate::types::{saturating_div, saturating_sum, GuestCount, UsageMap};
use crate::valuation::valuate;

const PERCENT: i64 = 100;

/// Cost and price of an event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CostBreakdown {
    pub ingredient_cost: Decimal,
    pub operational_cost: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
    pub final_price: Decimal,
}

/// Cost of a usage map at current average unit costs
///
/// Ingredients missing from the lookup contribute nothing.
pub fn ingredient_cost<L>(usage: &UsageMap, lookup: &L) -> Decimal
where
    L: IngredientLookup + ?Sized,
{
    saturating_sum(usage.iter().map(
        |(ingredient_id, quantity)| match lookup.find_ingredient(ingredient_id) {
            Some(ingredient) => valuate(ingredient).avg_unit_cost.saturating_mul(*quantity),
            None => Decimal::ZERO,
        },
    ))
}

pub fn operational_cost(staff: &[StaffMember]) -> Decimal {
    saturating_sum(staff.iter().map(|member| member.cost))
}

/// Combine ingredient and staff cost and apply the profit margin
///
/// No clamping: negative inputs carry through arithmetically.
pub fn aggregate<L>(
    usage: &UsageMap,
    lookup: &L,
    staff: &[StaffMember],
    profit_margin_percent: Decimal,
) -> CostBreakdown
where
    L: IngredientLookup + ?Sized,
{
    let ingredient_cost = ingredient_cost(usage, lookup);
    let operational_cost = operational_cost(staff);
    price(ingredient_cost, operational_cost, profit_margin_percent)
}

/// Price from already known ingredient and operational cost
pub fn price(
    ingredient_cost: Decimal,
    operational_cost: Decimal,
    profit_margin_percent: Decimal,
) -> CostBreakdown {
    let total_cost = ingredient_cost.saturating_add(operational_cost);
    let profit = ingredient_cost
        .saturating_mul(saturating_div(profit_margin_percent, Decimal::from(PERCENT)));

    CostBreakdown {
        ingredient_cost,
        operational_cost,
        total_cost,
        profit,
        final_price: total_cost.saturating_add(profit),
    }
}

/// Ingredient cost of a single serving
pub fn drink_cost_per_serving<L>(drink: &Drink, lookup: &L) -> Decimal
where
    L: IngredientLookup + ?Sized,
{
    saturating_sum(drink.recipe.iter().map(
        |line| match lookup.find_ingredient(&line.ingredient_id) {
            Some(ingredient) => valuate(ingredient).avg_unit_cost.saturating_mul(line.quantity),
            None => Decimal::ZERO,
        },
    ))
}

/// What-if parameters for costing an event before it exists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationInput {
    pub drink_ids: Vec<Uuid>,
    pub guests: GuestCount,
    pub duration_hours: Decimal,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    pub profit_margin_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    pub projection: EventProjection,
    pub costs: CostBreakdown,
}

/// Cost a hypothetical event against the catalog without touching stock
pub fn simulate(catalog: &Catalog, input: &SimulationInput) -> SimulationResult {
    let projection = project_event(
        catalog,
        &input.drink_ids,
        input.guests,
        input.duration_hours,
    );
    let costs = aggregate(
        &projection.usage,
        catalog,
        &input.staff,
        input.profit_margin_percent,
    );

    SimulationResult { projection, costs }
}
