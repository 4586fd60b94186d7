//! Costing engine tests
//!
//! Tests for valuation, projection and pricing including:
//! - Valuation total identity
//! - Alcoholic child suppression
//! - Profit basis
//! - End-to-end Mojito scenario

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::*;
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, d).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The worked example: 40 adults, 4 hours, one Mojito with 50ml rum
    #[test]
    fn test_mojito_end_to_end() {
        let rum = Ingredient::new("Rum", Unit::Ml, true).with_lot(PurchaseLot::new(
            day(1, 1),
            dec("5000"),
            dec("100"),
        ));
        let rum_id = rum.id;
        let mojito = Drink::new(
            "Mojito",
            vec![RecipeLine::new(rum_id, dec("50"))],
            ConsumptionEstimate::new(dec("0.5"), dec("0.2")),
        );
        let mut catalog = Catalog::new(vec![rum], vec![mojito.clone()]);

        let start = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();
        let mut event = Event::planned(
            "Birthday",
            start,
            start + Duration::hours(4),
            GuestCount::new(40, 0),
            vec![mojito.id],
            vec![],
        );

        let servings = project_servings(&mojito, &catalog, event.guests(), event.duration_hours());
        assert_eq!(servings, dec("80"));

        let usage = project_usage(&mojito, servings);
        assert_eq!(usage.get(&rum_id), dec("4000"));

        let rum_valuation = valuate(catalog.ingredient(&rum_id).unwrap());
        assert_eq!(rum_valuation.avg_unit_cost, dec("0.02"));

        let costs = aggregate(&usage, &catalog, &[], dec("0"));
        assert_eq!(costs.ingredient_cost, dec("80"));

        complete_event(&mut event, &mut catalog).unwrap();
        let rum = catalog.ingredient(&rum_id).unwrap();
        assert_eq!(rum.lots[0].remaining_quantity, dec("1000"));
    }

    /// Profit is a share of ingredient cost, not of total cost
    #[test]
    fn test_profit_basis_example() {
        let costs = price(dec("100"), dec("50"), dec("20"));
        assert_eq!(costs.final_price, dec("170"));
        assert_eq!(costs.total_cost, dec("150"));
        assert_eq!(costs.profit, dec("20"));
    }

    /// Average cost follows the remaining mix after depletion
    #[test]
    fn test_average_cost_moves_after_depletion() {
        let mut vodka = Ingredient::new("Vodka", Unit::Ml, true)
            .with_lot(PurchaseLot::new(day(1, 1), dec("1000"), dec("20")))
            .with_lot(PurchaseLot::new(day(2, 1), dec("1000"), dec("40")));
        assert_eq!(valuate(&vodka).avg_unit_cost, dec("0.03"));

        deplete(&mut vodka, dec("1000"));
        assert_eq!(valuate(&vodka).avg_unit_cost, dec("0.04"));
    }

    /// Zero guests or zero duration is a valid, empty projection
    #[test]
    fn test_simulation_with_no_guests_costs_only_staff() {
        let lime = Ingredient::new("Lime", Unit::Un, false).with_lot(PurchaseLot::new(
            day(1, 1),
            dec("100"),
            dec("50"),
        ));
        let drink = Drink::new(
            "Limeade",
            vec![RecipeLine::new(lime.id, dec("1"))],
            ConsumptionEstimate::new(dec("1"), dec("1")),
        );
        let catalog = Catalog::new(vec![lime], vec![drink.clone()]);

        let result = simulate(
            &catalog,
            &SimulationInput {
                drink_ids: vec![drink.id],
                guests: GuestCount::default(),
                duration_hours: dec("4"),
                staff: vec![StaffMember::new("Bartender", dec("150"))],
                profit_margin_percent: dec("100"),
            },
        );

        assert!(result.projection.usage.is_empty());
        assert_eq!(result.costs.ingredient_cost, Decimal::ZERO);
        assert_eq!(result.costs.final_price, dec("150"));
    }

    /// Lots bought for nothing are valued at zero rather than rejected
    #[test]
    fn test_zero_quantity_lot_is_free() {
        let mut odd = PurchaseLot::new(day(1, 1), Decimal::ZERO, dec("30"));
        odd.remaining_quantity = Decimal::ZERO;
        let syrup = Ingredient::new("Syrup", Unit::Ml, false).with_lot(odd);
        let valuation = valuate(&syrup);
        assert_eq!(valuation.total_value, Decimal::ZERO);
        assert_eq!(valuation.avg_unit_cost, Decimal::ZERO);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating quantities (0.1 to 1000.0)
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for generating prices (0.01 to 1000.00)
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for generating a lot with some stock consumed
    fn lot_strategy() -> impl Strategy<Value = PurchaseLot> {
        (quantity_strategy(), price_strategy(), 0u32..=100u32, 1u32..=28u32).prop_map(
            |(purchased, price, percent_left, d)| {
                let mut lot = PurchaseLot::new(day(1, d), purchased, price);
                lot.remaining_quantity = purchased * Decimal::from(percent_left) / Decimal::from(100);
                lot
            },
        )
    }

    fn rate_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=30i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Valuation total equals the per-lot sum, and average cost times stock approximates it
        #[test]
        fn prop_valuation_total_identity(lots in prop::collection::vec(lot_strategy(), 0..8)) {
            let mut ingredient = Ingredient::new("Gin", Unit::Ml, true);
            ingredient.lots = lots;

            let valuation = valuate(&ingredient);
            let expected: Decimal = ingredient
                .lots
                .iter()
                .map(|lot| lot.remaining_quantity * lot.unit_cost())
                .sum();
            prop_assert_eq!(valuation.total_value, expected);

            let reconstructed = valuation.avg_unit_cost * valuation.total_stock;
            prop_assert!((reconstructed - valuation.total_value).abs() < Decimal::new(1, 12));
        }

        /// Average cost lies between the cheapest and dearest lot still in stock
        #[test]
        fn prop_average_cost_bounded(lots in prop::collection::vec(lot_strategy(), 1..8)) {
            let mut ingredient = Ingredient::new("Gin", Unit::Ml, true);
            ingredient.lots = lots;

            let in_stock: Vec<Decimal> = ingredient
                .lots
                .iter()
                .filter(|lot| !lot.is_exhausted())
                .map(|lot| lot.unit_cost())
                .collect();
            if in_stock.is_empty() {
                return Ok(());
            }

            let tolerance = Decimal::new(1, 12);
            let avg = valuate(&ingredient).avg_unit_cost;
            let min = in_stock.iter().min().unwrap();
            let max = in_stock.iter().max().unwrap();
            prop_assert!(avg >= *min - tolerance);
            prop_assert!(avg <= *max + tolerance);
        }

        /// Children never drink alcoholic drinks
        #[test]
        fn prop_alcoholic_child_suppression(
            adults in 0u32..500,
            children in 1u32..500,
            adult_rate in rate_strategy(),
            child_rate in (1i64..=30i64).prop_map(|n| Decimal::new(n, 1)),
            hours in 1i64..=12,
        ) {
            let rum = Ingredient::new("Rum", Unit::Ml, true);
            let drink = Drink::new(
                "Punch",
                vec![RecipeLine::new(rum.id, dec("40"))],
                ConsumptionEstimate::new(adult_rate, child_rate),
            );
            let catalog = Catalog::new(vec![rum], vec![drink.clone()]);
            let duration = Decimal::from(hours);

            let with_children = project_servings(&drink, &catalog, GuestCount::new(adults, children), duration);
            let without = project_servings(&drink, &catalog, GuestCount::new(adults, 0), duration);
            prop_assert_eq!(
                project_usage(&drink, with_children),
                project_usage(&drink, without)
            );
        }

        /// Final price is ingredient cost plus operational cost plus margin on ingredients
        #[test]
        fn prop_profit_basis(
            ingredient_cost in price_strategy(),
            operational_cost in price_strategy(),
            margin in (0i64..=500i64).prop_map(Decimal::from),
        ) {
            let costs = price(ingredient_cost, operational_cost, margin);
            prop_assert_eq!(
                costs.final_price,
                ingredient_cost + operational_cost + ingredient_cost * margin / Decimal::from(100)
            );
            prop_assert_eq!(costs.total_cost, ingredient_cost + operational_cost);
        }

        /// Usage of a drink projected twice sums, it is never overwritten
        #[test]
        fn prop_usage_accumulates_across_drinks(
            first in quantity_strategy(),
            second in quantity_strategy(),
            servings in (1i64..=200i64).prop_map(Decimal::from),
        ) {
            let lime = Ingredient::new("Lime", Unit::Ml, false);
            let a = Drink::new("A", vec![RecipeLine::new(lime.id, first)], ConsumptionEstimate::default());
            let b = Drink::new("B", vec![RecipeLine::new(lime.id, second)], ConsumptionEstimate::default());

            let mut usage = project_usage(&a, servings);
            usage.merge(&project_usage(&b, servings));
            prop_assert_eq!(usage.get(&lime.id), (first + second) * servings);
        }
    }
}
