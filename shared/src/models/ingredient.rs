//! Ingredient and purchase lot models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{saturating_div, saturating_sum};

/// Unit an ingredient is measured in
///
/// Fixed per ingredient: recipe lines, lots and usage for that ingredient are
/// all expressed in it. Nothing converts between units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Ml,
    L,
    G,
    Kg,
    Un,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Un => "un",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One purchase batch of an ingredient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseLot {
    pub id: Uuid,
    /// Purchase date, the FIFO ordering key
    pub date: NaiveDate,
    pub purchased_quantity: Decimal,
    /// Price paid for the whole lot
    pub total_price: Decimal,
    /// Always within `0..=purchased_quantity`
    pub remaining_quantity: Decimal,
}

impl PurchaseLot {
    /// A fresh, untouched lot
    pub fn new(date: NaiveDate, purchased_quantity: Decimal, total_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            purchased_quantity,
            total_price,
            remaining_quantity: purchased_quantity,
        }
    }

    /// Cost of one unit from this lot. A lot with no purchased quantity costs nothing.
    pub fn unit_cost(&self) -> Decimal {
        if self.purchased_quantity > Decimal::ZERO {
            saturating_div(self.total_price, self.purchased_quantity)
        } else {
            Decimal::ZERO
        }
    }

    pub fn remaining_value(&self) -> Decimal {
        self.remaining_quantity.saturating_mul(self.unit_cost())
    }

    pub fn consumed_quantity(&self) -> Decimal {
        self.purchased_quantity - self.remaining_quantity
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_quantity <= Decimal::ZERO
    }
}

/// A stocked ingredient together with its purchase lots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub unit: Unit,
    pub is_alcoholic: bool,
    #[serde(default)]
    pub lots: Vec<PurchaseLot>,
    /// Stock level (in `unit`) below which the ingredient is flagged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<Decimal>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, unit: Unit, is_alcoholic: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            unit,
            is_alcoholic,
            lots: Vec::new(),
            low_stock_threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.low_stock_threshold = Some(threshold);
        self
    }

    pub fn with_lot(mut self, lot: PurchaseLot) -> Self {
        self.lots.push(lot);
        self
    }

    /// Sum of remaining quantity over all lots
    pub fn total_stock(&self) -> Decimal {
        saturating_sum(self.lots.iter().map(|lot| lot.remaining_quantity))
    }

    pub fn lot(&self, lot_id: &Uuid) -> Option<&PurchaseLot> {
        self.lots.iter().find(|lot| lot.id == *lot_id)
    }

    /// Lots in consumption order. Same-day lots keep their insertion order.
    pub fn lots_oldest_first(&self) -> Vec<&PurchaseLot> {
        let mut lots: Vec<&PurchaseLot> = self.lots.iter().collect();
        lots.sort_by_key(|lot| lot.date);
        lots
    }

    /// Lots for a purchase history view
    pub fn lots_newest_first(&self) -> Vec<&PurchaseLot> {
        let mut lots = self.lots_oldest_first();
        lots.reverse();
        lots
    }
}
