//! Consumption projection
//!
//! Turns a drink's per-person-per-hour rates, the guest composition and the
//! event duration into servings, and servings into raw ingredient usage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Catalog, Drink, IngredientLookup};
use crate::types::{saturating_sum, GuestCount, UsageMap};

/// A drink is alcoholic when any recipe line references an alcoholic ingredient.
///
/// Lines pointing at unknown ingredients do not count.
pub fn is_alcoholic<L>(drink: &Drink, lookup: &L) -> bool
where
    L: IngredientLookup + ?Sized,
{
    drink.recipe.iter().any(|line| {
        lookup
            .find_ingredient(&line.ingredient_id)
            .is_some_and(|ingredient| ingredient.is_alcoholic)
    })
}

/// Children rate actually applied: always zero for alcoholic drinks
pub fn effective_children_rate<L>(drink: &Drink, lookup: &L) -> Decimal
where
    L: IngredientLookup + ?Sized,
{
    if is_alcoholic(drink, lookup) {
        Decimal::ZERO
    } else {
        drink.consumption_estimate.children_per_person_per_hour
    }
}

/// Total servings of a drink over the event
///
/// A non-positive duration projects nothing.
pub fn project_servings<L>(
    drink: &Drink,
    lookup: &L,
    guests: GuestCount,
    duration_hours: Decimal,
) -> Decimal
where
    L: IngredientLookup + ?Sized,
{
    if duration_hours <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let adult_servings = Decimal::from(guests.adults)
        .saturating_mul(duration_hours)
        .saturating_mul(drink.consumption_estimate.adults_per_person_per_hour);
    let child_servings = Decimal::from(guests.children)
        .saturating_mul(duration_hours)
        .saturating_mul(effective_children_rate(drink, lookup));

    adult_servings.saturating_add(child_servings)
}

/// Raw usage for a number of servings; empty when there is nothing to serve
pub fn project_usage(drink: &Drink, total_servings: Decimal) -> UsageMap {
    if total_servings <= Decimal::ZERO {
        return UsageMap::new();
    }

    drink
        .recipe
        .iter()
        .map(|line| (line.ingredient_id, line.quantity.saturating_mul(total_servings)))
        .collect()
}

/// Projection of a single drink within an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrinkProjection {
    pub drink_id: Uuid,
    pub drink_name: String,
    pub is_alcoholic: bool,
    pub servings: Decimal,
    pub usage: UsageMap,
}

/// Projection of every selected drink, with usage consolidated per ingredient
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventProjection {
    pub per_drink: Vec<DrinkProjection>,
    pub usage: UsageMap,
    /// Selected ids with no matching drink in the catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_drinks: Vec<Uuid>,
}

impl EventProjection {
    pub fn total_servings(&self) -> Decimal {
        saturating_sum(self.per_drink.iter().map(|drink| drink.servings))
    }
}

/// Project all selected drinks and sum their usage
///
/// A drink selected twice is projected once. Unknown drink ids are skipped.
pub fn project_event(
    catalog: &Catalog,
    drink_ids: &[Uuid],
    guests: GuestCount,
    duration_hours: Decimal,
) -> EventProjection {
    let mut projection = EventProjection::default();
    let mut seen: Vec<Uuid> = Vec::with_capacity(drink_ids.len());

    for drink_id in drink_ids {
        if seen.contains(drink_id) {
            continue;
        }
        seen.push(*drink_id);

        let Some(drink) = catalog.drink(drink_id) else {
            tracing::warn!("Skipping unknown drink {} in projection", drink_id);
            projection.unknown_drinks.push(*drink_id);
            continue;
        };

        let servings = project_servings(drink, catalog, guests, duration_hours);
        let usage = project_usage(drink, servings);
        projection.usage.merge(&usage);
        projection.per_drink.push(DrinkProjection {
            drink_id: drink.id,
            drink_name: drink.name.clone(),
            is_alcoholic: is_alcoholic(drink, catalog),
            servings,
            usage,
        });
    }

    tracing::debug!(
        "Projected {} drinks over {} hours into {} ingredients",
        projection.per_drink.len(),
        duration_hours,
        projection.usage.len()
    );

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsumptionEstimate, Ingredient, RecipeLine, Unit};

    fn dec(n: i64, scale: u32) -> Decimal {
        Decimal::new(n, scale)
    }

    fn fixture() -> (Catalog, Drink, Drink) {
        let rum = Ingredient::new("Rum", Unit::Ml, true);
        let lime = Ingredient::new("Lime juice", Unit::Ml, false);
        let soda = Ingredient::new("Soda", Unit::Ml, false);
        let mojito = Drink::new(
            "Mojito",
            vec![
                RecipeLine::new(rum.id, dec(50, 0)),
                RecipeLine::new(lime.id, dec(20, 0)),
            ],
            ConsumptionEstimate::new(dec(5, 1), dec(2, 1)),
        );
        let lemonade = Drink::new(
            "Lemonade",
            vec![
                RecipeLine::new(lime.id, dec(30, 0)),
                RecipeLine::new(soda.id, dec(200, 0)),
            ],
            ConsumptionEstimate::new(dec(1, 0), dec(15, 1)),
        );
        let catalog = Catalog::new(vec![rum, lime, soda], vec![mojito.clone(), lemonade.clone()]);
        (catalog, mojito, lemonade)
    }

    #[test]
    fn test_is_alcoholic_derived_from_ingredients() {
        let (mut catalog, mojito, lemonade) = fixture();
        assert!(is_alcoholic(&mojito, &catalog));
        assert!(!is_alcoholic(&lemonade, &catalog));

        // Flipping the ingredient flag changes the drink immediately
        for ingredient in catalog.ingredients.iter_mut() {
            ingredient.is_alcoholic = false;
        }
        assert!(!is_alcoholic(&mojito, &catalog));
    }

    #[test]
    fn test_unknown_ingredient_is_not_alcoholic() {
        let drink = Drink::new(
            "Mystery",
            vec![RecipeLine::new(Uuid::new_v4(), dec(10, 0))],
            ConsumptionEstimate::default(),
        );
        assert!(!is_alcoholic(&drink, &Catalog::default()));
    }

    #[test]
    fn test_servings_adults_only() {
        let (catalog, mojito, _) = fixture();
        let servings = project_servings(&mojito, &catalog, GuestCount::new(40, 0), dec(4, 0));
        assert_eq!(servings, dec(80, 0));
    }

    #[test]
    fn test_servings_children_suppressed_for_alcoholic() {
        let (catalog, mojito, _) = fixture();
        let with_children = project_servings(&mojito, &catalog, GuestCount::new(40, 25), dec(4, 0));
        let without = project_servings(&mojito, &catalog, GuestCount::new(40, 0), dec(4, 0));
        assert_eq!(with_children, without);
    }

    #[test]
    fn test_servings_children_count_for_non_alcoholic() {
        let (catalog, _, lemonade) = fixture();
        // 10 adults * 2h * 1 + 4 children * 2h * 1.5
        let servings = project_servings(&lemonade, &catalog, GuestCount::new(10, 4), dec(2, 0));
        assert_eq!(servings, dec(32, 0));
    }

    #[test]
    fn test_non_positive_duration_projects_nothing() {
        let (catalog, mojito, _) = fixture();
        let guests = GuestCount::new(40, 0);
        assert_eq!(project_servings(&mojito, &catalog, guests, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(project_servings(&mojito, &catalog, guests, dec(-2, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_usage_empty_without_servings() {
        let (_, mojito, _) = fixture();
        assert!(project_usage(&mojito, Decimal::ZERO).is_empty());
        assert!(project_usage(&mojito, dec(-1, 0)).is_empty());
    }

    #[test]
    fn test_usage_scales_recipe() {
        let (_, mojito, _) = fixture();
        let usage = project_usage(&mojito, dec(80, 0));
        assert_eq!(usage.get(&mojito.recipe[0].ingredient_id), dec(4000, 0));
        assert_eq!(usage.get(&mojito.recipe[1].ingredient_id), dec(1600, 0));
    }

    #[test]
    fn test_event_usage_sums_shared_ingredients() {
        let (catalog, mojito, lemonade) = fixture();
        let lime_id = mojito.recipe[1].ingredient_id;
        let projection = project_event(
            &catalog,
            &[mojito.id, lemonade.id],
            GuestCount::new(10, 0),
            dec(1, 0),
        );
        // mojito: 5 servings * 20ml, lemonade: 10 servings * 30ml
        assert_eq!(projection.usage.get(&lime_id), dec(400, 0));
        assert_eq!(projection.total_servings(), dec(15, 0));
        assert_eq!(projection.per_drink.len(), 2);
        assert!(projection.per_drink[0].is_alcoholic);
    }

    #[test]
    fn test_event_projection_skips_unknown_and_duplicate_drinks() {
        let (catalog, mojito, _) = fixture();
        let ghost = Uuid::new_v4();
        let projection = project_event(
            &catalog,
            &[mojito.id, ghost, mojito.id],
            GuestCount::new(40, 0),
            dec(4, 0),
        );
        assert_eq!(projection.per_drink.len(), 1);
        assert_eq!(projection.unknown_drinks, vec![ghost]);
        assert_eq!(projection.total_servings(), dec(80, 0));
    }

    #[test]
    fn test_servings_saturate_instead_of_overflowing() {
        let (catalog, _, _) = fixture();
        let firehose = Drink::new(
            "Firehose",
            vec![RecipeLine::new(Uuid::new_v4(), dec(1_000_000_000, 0))],
            ConsumptionEstimate::new(dec(1_000_000_000, 0), Decimal::ZERO),
        );
        let hours = Decimal::from(100_000_000_000_000i64);

        let servings = project_servings(&firehose, &catalog, GuestCount::new(u32::MAX, 0), hours);
        assert_eq!(servings, Decimal::MAX);

        let usage = project_usage(&firehose, servings);
        assert_eq!(usage.iter().next().map(|(_, q)| *q), Some(Decimal::MAX));
    }
}
