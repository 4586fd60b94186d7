//! Drink and recipe models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quantity of one ingredient in a single serving, in the ingredient's unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeLine {
    pub ingredient_id: Uuid,
    pub quantity: Decimal,
}

impl RecipeLine {
    pub fn new(ingredient_id: Uuid, quantity: Decimal) -> Self {
        Self {
            ingredient_id,
            quantity,
        }
    }
}

/// Assumed servings per person per hour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumptionEstimate {
    pub adults_per_person_per_hour: Decimal,
    /// Ignored for alcoholic drinks
    pub children_per_person_per_hour: Decimal,
}

impl ConsumptionEstimate {
    pub fn new(adults_per_person_per_hour: Decimal, children_per_person_per_hour: Decimal) -> Self {
        Self {
            adults_per_person_per_hour,
            children_per_person_per_hour,
        }
    }
}

impl Default for ConsumptionEstimate {
    /// Half a serving per adult per hour, none for children
    fn default() -> Self {
        Self {
            adults_per_person_per_hour: Decimal::new(5, 1),
            children_per_person_per_hour: Decimal::ZERO,
        }
    }
}

/// A drink on the menu
///
/// Whether a drink is alcoholic is derived from its ingredients at the time of
/// the calculation (see [`crate::projection::is_alcoholic`]), never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drink {
    pub id: Uuid,
    pub name: String,
    pub recipe: Vec<RecipeLine>,
    pub consumption_estimate: ConsumptionEstimate,
}

impl Drink {
    pub fn new(
        name: impl Into<String>,
        recipe: Vec<RecipeLine>,
        consumption_estimate: ConsumptionEstimate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            recipe,
            consumption_estimate,
        }
    }

    pub fn uses_ingredient(&self, ingredient_id: &Uuid) -> bool {
        self.recipe
            .iter()
            .any(|line| line.ingredient_id == *ingredient_id)
    }
}
