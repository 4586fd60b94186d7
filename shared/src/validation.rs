//! Validation utilities for the Bar Costing Platform
//!
//! Input checks applied before data reaches the engine. The engine itself
//! stays permissive: costing math never rejects a value.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{ConsumptionEstimate, RecipeLine};
use crate::types::GuestCount;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate ingredient or drink name is not blank
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    Ok(())
}

/// Validate consumption rates are not negative
pub fn validate_consumption_estimate(estimate: &ConsumptionEstimate) -> Result<(), &'static str> {
    if estimate.adults_per_person_per_hour < Decimal::ZERO
        || estimate.children_per_person_per_hour < Decimal::ZERO
    {
        return Err("Consumption rates cannot be negative");
    }
    Ok(())
}

/// Validate a recipe has at least one line and every quantity is positive
pub fn validate_recipe(recipe: &[RecipeLine]) -> Result<(), &'static str> {
    if recipe.is_empty() {
        return Err("Recipe must have at least one ingredient");
    }
    if recipe.iter().any(|line| line.quantity <= Decimal::ZERO) {
        return Err("Recipe quantities must be positive");
    }
    Ok(())
}

/// Validate low stock threshold is not negative
pub fn validate_low_stock_threshold(threshold: Option<Decimal>) -> Result<(), &'static str> {
    match threshold {
        Some(t) if t < Decimal::ZERO => Err("Low stock threshold cannot be negative"),
        _ => Ok(()),
    }
}

// ============================================================================
// Event Validations
// ============================================================================

/// Validate event ends strictly after it starts
pub fn validate_event_schedule(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<(), &'static str> {
    if end_time <= start_time {
        return Err("End time must be after start time");
    }
    Ok(())
}

/// Validate an event before it is saved
pub fn validate_event_plan(
    name: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    drink_ids: &[Uuid],
    guests: GuestCount,
) -> Result<(), &'static str> {
    validate_event_plan_counts(name, start_time, end_time, drink_ids.len(), guests)
}

/// Same checks as [`validate_event_plan`] when only the number of drinks is known
pub fn validate_event_plan_counts(
    name: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    drink_count: usize,
    guests: GuestCount,
) -> Result<(), &'static str> {
    validate_name(name)?;
    validate_event_schedule(start_time, end_time)?;
    if drink_count == 0 {
        return Err("Select at least one drink");
    }
    if guests.is_empty() {
        return Err("Event must have at least one guest");
    }
    Ok(())
}

/// Validate profit margin is not negative
pub fn validate_profit_margin(profit_margin_percent: Decimal) -> Result<(), &'static str> {
    if profit_margin_percent < Decimal::ZERO {
        return Err("Profit margin cannot be negative");
    }
    Ok(())
}

/// Validate staff cost is not negative
pub fn validate_staff_cost(cost: Decimal) -> Result<(), &'static str> {
    if cost < Decimal::ZERO {
        return Err("Staff cost cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Caipirinha").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_validate_consumption_estimate() {
        assert!(validate_consumption_estimate(&ConsumptionEstimate::default()).is_ok());
        let negative = ConsumptionEstimate::new(Decimal::ONE, Decimal::from(-1));
        assert!(validate_consumption_estimate(&negative).is_err());
    }

    #[test]
    fn test_validate_recipe() {
        let id = Uuid::new_v4();
        assert!(validate_recipe(&[RecipeLine::new(id, Decimal::from(50))]).is_ok());
        assert!(validate_recipe(&[]).is_err());
        assert!(validate_recipe(&[RecipeLine::new(id, Decimal::ZERO)]).is_err());
    }

    #[test]
    fn test_validate_low_stock_threshold() {
        assert!(validate_low_stock_threshold(None).is_ok());
        assert!(validate_low_stock_threshold(Some(Decimal::ZERO)).is_ok());
        assert!(validate_low_stock_threshold(Some(Decimal::from(-5))).is_err());
    }

    #[test]
    fn test_validate_event_schedule() {
        assert!(validate_event_schedule(start(), start() + Duration::hours(4)).is_ok());
        assert!(validate_event_schedule(start(), start()).is_err());
        assert!(validate_event_schedule(start(), start() - Duration::hours(1)).is_err());
    }

    #[test]
    fn test_validate_event_plan() {
        let drinks = vec![Uuid::new_v4()];
        let end = start() + Duration::hours(4);
        let guests = GuestCount::new(40, 10);
        assert!(validate_event_plan("Wedding", start(), end, &drinks, guests).is_ok());
        assert!(validate_event_plan("", start(), end, &drinks, guests).is_err());
        assert!(validate_event_plan("Wedding", start(), end, &[], guests).is_err());
        assert!(
            validate_event_plan("Wedding", start(), end, &drinks, GuestCount::default()).is_err()
        );
    }

    #[test]
    fn test_validate_event_plan_counts() {
        let end = start() + Duration::hours(4);
        let guests = GuestCount::new(10, 0);
        assert!(validate_event_plan_counts("Wedding", start(), end, usize::MAX, guests).is_ok());
        assert_eq!(
            validate_event_plan_counts("Wedding", start(), end, 0, guests),
            Err("Select at least one drink")
        );
    }

    #[test]
    fn test_validate_profit_margin_and_staff_cost() {
        assert!(validate_profit_margin(Decimal::from(100)).is_ok());
        assert!(validate_profit_margin(Decimal::from(-1)).is_err());
        assert!(validate_staff_cost(Decimal::ZERO).is_ok());
        assert!(validate_staff_cost(Decimal::from(-1)).is_err());
    }
}
