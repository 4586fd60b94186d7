//! WebAssembly module for the Bar Costing Platform
//!
//! Provides client-side computation for:
//! - Event cost simulation
//! - Drink cost per serving
//! - Stock valuation and depletion previews
//!
//! Every function takes and returns JSON strings; decimals travel as strings
//! so no precision is lost crossing into JavaScript.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Cost a hypothetical event; returns the projection and cost breakdown
#[wasm_bindgen]
pub fn simulate_event_costs(catalog_json: &str, input_json: &str) -> Result<String, JsValue> {
    let (result, unknown_drinks) = simulate_json(catalog_json, input_json).map_err(to_js)?;
    if unknown_drinks > 0 {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "{} selected drinks are not in the catalog",
            unknown_drinks
        )));
    }
    Ok(result)
}

/// Ingredient cost of one serving of a drink
#[wasm_bindgen]
pub fn drink_cost(catalog_json: &str, drink_id: &str) -> Result<String, JsValue> {
    drink_cost_json(catalog_json, drink_id).map_err(to_js)
}

/// Total stock, average unit cost and value of an ingredient
#[wasm_bindgen]
pub fn valuate_ingredient(ingredient_json: &str) -> Result<String, JsValue> {
    valuate_json(ingredient_json).map_err(to_js)
}

/// Price from ingredient cost, operational cost and margin on ingredients
#[wasm_bindgen]
pub fn final_price(
    ingredient_cost: &str,
    operational_cost: &str,
    profit_margin_percent: &str,
) -> Result<String, JsValue> {
    final_price_json(ingredient_cost, operational_cost, profit_margin_percent).map_err(to_js)
}

/// Hours between two RFC 3339 timestamps; negative when inverted
#[wasm_bindgen]
pub fn event_duration_hours(start_time: &str, end_time: &str) -> Result<String, JsValue> {
    duration_hours(start_time, end_time).map_err(to_js)
}

/// Lots as they would look after taking a quantity FIFO, plus any shortfall
#[wasm_bindgen]
pub fn preview_depletion(ingredient_json: &str, quantity: &str) -> Result<String, JsValue> {
    preview_json(ingredient_json, quantity).map_err(to_js)
}

/// Whether an event can be saved; returns the problem or an empty string
#[wasm_bindgen]
pub fn check_event(
    name: &str,
    start_time: &str,
    end_time: &str,
    drink_count: u32,
    num_adults: u32,
    num_children: u32,
) -> String {
    match check_event_plan(name, start_time, end_time, drink_count, num_adults, num_children) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

// ============================================================================
// JSON plumbing
// ============================================================================

#[derive(Serialize)]
struct DepletionPreview {
    plan: shared::DepletionPlan,
    lots: Vec<PurchaseLot>,
}

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn decimal(value: &str, what: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|e| format!("Invalid {}: {}", what, e))
}

fn timestamp(value: &str, what: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("Invalid {}: {}", what, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn simulate_json(catalog_json: &str, input_json: &str) -> Result<(String, usize), String> {
    let catalog: Catalog = parse(catalog_json, "catalog")?;
    let input: shared::SimulationInput = parse(input_json, "simulation")?;
    let result = shared::simulate(&catalog, &input);
    Ok((to_json(&result)?, result.projection.unknown_drinks.len()))
}

fn drink_cost_json(catalog_json: &str, drink_id: &str) -> Result<String, String> {
    let catalog: Catalog = parse(catalog_json, "catalog")?;
    let drink_id = uuid_of(drink_id)?;
    let drink = catalog
        .drink(&drink_id)
        .ok_or_else(|| format!("Drink {} not found", drink_id))?;
    Ok(shared::drink_cost_per_serving(drink, &catalog).to_string())
}

fn uuid_of(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|e| format!("Invalid id: {}", e))
}

fn valuate_json(ingredient_json: &str) -> Result<String, String> {
    let ingredient: Ingredient = parse(ingredient_json, "ingredient")?;
    to_json(&shared::valuate(&ingredient))
}

fn final_price_json(
    ingredient_cost: &str,
    operational_cost: &str,
    profit_margin_percent: &str,
) -> Result<String, String> {
    let costs = shared::price(
        decimal(ingredient_cost, "ingredient cost")?,
        decimal(operational_cost, "operational cost")?,
        decimal(profit_margin_percent, "profit margin")?,
    );
    to_json(&costs)
}

fn duration_hours(start_time: &str, end_time: &str) -> Result<String, String> {
    let start = timestamp(start_time, "start time")?;
    let end = timestamp(end_time, "end time")?;
    let event = Event::planned("", start, end, GuestCount::default(), vec![], vec![]);
    Ok(event.duration_hours().normalize().to_string())
}

fn preview_json(ingredient_json: &str, quantity: &str) -> Result<String, String> {
    let ingredient: Ingredient = parse(ingredient_json, "ingredient")?;
    let plan = shared::plan_depletion(&ingredient, decimal(quantity, "quantity")?);
    let lots = plan.preview(&ingredient);
    to_json(&DepletionPreview { plan, lots })
}

fn check_event_plan(
    name: &str,
    start_time: &str,
    end_time: &str,
    drink_count: u32,
    num_adults: u32,
    num_children: u32,
) -> Result<(), String> {
    let start = timestamp(start_time, "start time")?;
    let end = timestamp(end_time, "end time")?;
    validate_event_plan_counts(
        name,
        start,
        end,
        drink_count as usize,
        GuestCount::new(num_adults, num_children),
    )
    .map_err(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn catalog() -> (String, String) {
        let rum = Ingredient::new("Rum", Unit::Ml, true).with_lot(PurchaseLot::new(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Decimal::from(5000),
            Decimal::from(100),
        ));
        let mojito = Drink::new(
            "Mojito",
            vec![RecipeLine::new(rum.id, Decimal::from(50))],
            ConsumptionEstimate::default(),
        );
        let drink_id = mojito.id.to_string();
        let catalog = Catalog::new(vec![rum], vec![mojito]);
        (serde_json::to_string(&catalog).unwrap(), drink_id)
    }

    fn field(json: &str, key: &str) -> Decimal {
        let value: Value = serde_json::from_str(json).unwrap();
        Decimal::from_str(value[key].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_simulate_mojito() {
        let (catalog, drink_id) = catalog();
        let input = json!({
            "drink_ids": [drink_id],
            "guests": { "adults": 40, "children": 10 },
            "duration_hours": "4",
            "profit_margin_percent": "100"
        });

        let (result, unknown) = simulate_json(&catalog, &input.to_string()).unwrap();
        let value: Value = serde_json::from_str(&result).unwrap();

        assert_eq!(unknown, 0);
        assert_eq!(
            Decimal::from_str(value["costs"]["final_price"].as_str().unwrap()).unwrap(),
            Decimal::from(160)
        );
    }

    #[test]
    fn test_drink_cost() {
        let (catalog, drink_id) = catalog();
        let cost = drink_cost_json(&catalog, &drink_id).unwrap();
        assert_eq!(Decimal::from_str(&cost).unwrap(), Decimal::from(1));
        assert!(drink_cost_json(&catalog, "not-a-uuid").is_err());
    }

    #[test]
    fn test_final_price() {
        let costs = final_price_json("100", "50", "20").unwrap();
        assert_eq!(field(&costs, "final_price"), Decimal::from(170));
        assert!(final_price_json("abc", "50", "20").is_err());
    }

    #[test]
    fn test_event_duration() {
        assert_eq!(
            duration_hours("2024-06-01T18:00:00Z", "2024-06-01T22:30:00Z").unwrap(),
            "4.5"
        );
        assert!(duration_hours("yesterday", "2024-06-01T22:30:00Z").is_err());
    }

    #[test]
    fn test_preview_reports_shortfall() {
        let ingredient = Ingredient::new("Tonic", Unit::Ml, false).with_lot(PurchaseLot::new(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Decimal::from(500),
            Decimal::from(10),
        ));
        let json = serde_json::to_string(&ingredient).unwrap();

        let preview = preview_json(&json, "800").unwrap();
        let value: Value = serde_json::from_str(&preview).unwrap();

        assert_eq!(
            Decimal::from_str(value["plan"]["shortfall"].as_str().unwrap()).unwrap(),
            Decimal::from(300)
        );
        assert_eq!(
            Decimal::from_str(value["lots"][0]["remaining_quantity"].as_str().unwrap()).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_check_event() {
        let start = "2024-06-01T18:00:00Z";
        let end = "2024-06-01T22:00:00Z";
        assert_eq!(check_event("Party", start, end, 1, 10, 0), "");
        assert_eq!(
            check_event("Party", end, start, 1, 10, 0),
            "End time must be after start time"
        );
        assert_eq!(
            check_event("Party", start, end, 0, 10, 0),
            "Select at least one drink"
        );
        assert_eq!(check_event("Party", start, end, u32::MAX, 10, 0), "");
    }
}
