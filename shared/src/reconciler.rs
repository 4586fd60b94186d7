//! Event completion
//!
//! The only side-effecting composition in the engine: project every selected
//! drink, deplete the consolidated usage FIFO, and flip the event to
//! completed. The whole set of lot mutations and the status change are
//! applied together or not at all.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::depletion::{plan_depletion, DepletionPlan};
use crate::error::CompletionError;
use crate::models::{Catalog, Event, EventStatus};
use crate::projection::{project_event, EventProjection};
use crate::types::UsageMap;

/// Everything completing an event will do, computed without side effects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionPlan {
    pub event_id: Uuid,
    pub duration_hours: Decimal,
    pub projection: EventProjection,
    pub depletions: Vec<DepletionPlan>,
    /// Usage entries with no matching ingredient; nothing is depleted for them
    pub unknown_ingredients: Vec<Uuid>,
}

impl CompletionPlan {
    /// Unmet quantity per ingredient, only for ingredients that ran short
    pub fn shortfalls(&self) -> BTreeMap<Uuid, Decimal> {
        self.depletions
            .iter()
            .filter(|plan| plan.has_shortfall())
            .map(|plan| (plan.ingredient_id, plan.shortfall))
            .collect()
    }
}

/// What a completion did
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionReport {
    pub event_id: Uuid,
    pub usage: UsageMap,
    pub depletions: Vec<DepletionPlan>,
    pub shortfalls: BTreeMap<Uuid, Decimal>,
    pub unknown_ingredients: Vec<Uuid>,
    pub unknown_drinks: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The event was already completed; nothing changed
    AlreadyCompleted,
    Completed(CompletionReport),
}

impl CompletionOutcome {
    pub fn report(&self) -> Option<&CompletionReport> {
        match self {
            CompletionOutcome::AlreadyCompleted => None,
            CompletionOutcome::Completed(report) => Some(report),
        }
    }
}

/// Plan the completion of an event against the current catalog
pub fn plan_completion(event: &Event, catalog: &Catalog) -> Result<CompletionPlan, CompletionError> {
    let duration_hours = event.duration_hours();
    if duration_hours <= Decimal::ZERO {
        return Err(CompletionError::InvalidDuration { duration_hours });
    }

    let projection = project_event(
        catalog,
        &event.selected_drink_ids,
        event.guests(),
        duration_hours,
    );

    let mut depletions = Vec::with_capacity(projection.usage.len());
    let mut unknown_ingredients = Vec::new();
    for (ingredient_id, quantity) in projection.usage.iter() {
        match catalog.ingredient(ingredient_id) {
            Some(ingredient) => depletions.push(plan_depletion(ingredient, *quantity)),
            None => {
                tracing::warn!(
                    "Event {} uses unknown ingredient {}; skipping depletion",
                    event.id,
                    ingredient_id
                );
                unknown_ingredients.push(*ingredient_id);
            }
        }
    }

    Ok(CompletionPlan {
        event_id: event.id,
        duration_hours,
        projection,
        depletions,
        unknown_ingredients,
    })
}

/// Apply a completion plan to the event and the catalog it was planned from
///
/// Every depletion is checked against the current lots first; if any no
/// longer fits, nothing is changed.
pub fn apply_completion(
    plan: CompletionPlan,
    event: &mut Event,
    catalog: &mut Catalog,
) -> Result<CompletionOutcome, CompletionError> {
    if event.id != plan.event_id {
        return Err(CompletionError::EventMismatch {
            planned: plan.event_id,
            actual: event.id,
        });
    }
    if event.is_completed() {
        return Ok(CompletionOutcome::AlreadyCompleted);
    }

    for depletion in &plan.depletions {
        if let Some(ingredient) = catalog.ingredient(&depletion.ingredient_id) {
            depletion.validate(ingredient)?;
        }
    }

    for depletion in &plan.depletions {
        if let Some(ingredient) = catalog.ingredient_mut(&depletion.ingredient_id) {
            depletion.apply(ingredient)?;
        }
    }
    event.status = EventStatus::Completed;

    let shortfalls = plan.shortfalls();
    for (ingredient_id, shortfall) in &shortfalls {
        tracing::warn!(
            "Event {} ran short of ingredient {} by {}",
            event.id,
            ingredient_id,
            shortfall
        );
    }
    tracing::info!(
        "Completed event {} ({}): {} ingredients depleted, {} short",
        event.name,
        event.id,
        plan.depletions.len(),
        shortfalls.len()
    );

    Ok(CompletionOutcome::Completed(CompletionReport {
        event_id: plan.event_id,
        usage: plan.projection.usage,
        depletions: plan.depletions,
        shortfalls,
        unknown_ingredients: plan.unknown_ingredients,
        unknown_drinks: plan.projection.unknown_drinks,
    }))
}

/// Complete a planned event, depleting stock for everything it served
///
/// Completing an already completed event is a no-op. An event whose end is
/// not after its start is refused.
pub fn complete_event(
    event: &mut Event,
    catalog: &mut Catalog,
) -> Result<CompletionOutcome, CompletionError> {
    if event.is_completed() {
        tracing::debug!("Event {} already completed", event.id);
        return Ok(CompletionOutcome::AlreadyCompleted);
    }

    let plan = plan_completion(event, catalog)?;
    apply_completion(plan, event, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsumptionEstimate, Drink, Ingredient, PurchaseLot, RecipeLine, Unit};
    use crate::types::GuestCount;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn setup(hours: i64) -> (Event, Catalog, Uuid) {
        let rum = Ingredient::new("Rum", Unit::Ml, true).with_lot(PurchaseLot::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Decimal::from(5000),
            Decimal::from(100),
        ));
        let rum_id = rum.id;
        let mojito = Drink::new(
            "Mojito",
            vec![RecipeLine::new(rum.id, Decimal::from(50))],
            ConsumptionEstimate::new(Decimal::new(5, 1), Decimal::new(2, 1)),
        );
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();
        let event = Event::planned(
            "Party",
            start,
            start + Duration::hours(hours),
            GuestCount::new(40, 0),
            vec![mojito.id],
            vec![],
        );
        (event, Catalog::new(vec![rum], vec![mojito]), rum_id)
    }

    #[test]
    fn test_complete_event_depletes_and_flips_status() {
        let (mut event, mut catalog, rum_id) = setup(4);
        let outcome = complete_event(&mut event, &mut catalog).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.usage.get(&rum_id), Decimal::from(4000));
        assert!(report.shortfalls.is_empty());
        assert_eq!(event.status, EventStatus::Completed);
        assert_eq!(
            catalog.ingredient(&rum_id).unwrap().total_stock(),
            Decimal::from(1000)
        );
    }

    #[test]
    fn test_complete_event_twice_is_noop() {
        let (mut event, mut catalog, _) = setup(4);
        complete_event(&mut event, &mut catalog).unwrap();
        let after_first = catalog.clone();
        let outcome = complete_event(&mut event, &mut catalog).unwrap();
        assert_eq!(outcome, CompletionOutcome::AlreadyCompleted);
        assert_eq!(catalog, after_first);
    }

    #[test]
    fn test_zero_duration_is_refused() {
        let (mut event, mut catalog, _) = setup(0);
        let before = catalog.clone();
        let result = complete_event(&mut event, &mut catalog);
        assert!(matches!(result, Err(CompletionError::InvalidDuration { .. })));
        assert_eq!(event.status, EventStatus::Planned);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_shortfall_is_reported_not_fatal() {
        let (mut event, mut catalog, rum_id) = setup(10);
        let outcome = complete_event(&mut event, &mut catalog).unwrap();
        let report = outcome.report().unwrap();
        // 40 * 10 * 0.5 * 50 = 10000ml against 5000ml
        assert_eq!(report.shortfalls.get(&rum_id), Some(&Decimal::from(5000)));
        assert_eq!(
            catalog.ingredient(&rum_id).unwrap().total_stock(),
            Decimal::ZERO
        );
        assert!(event.is_completed());
    }

    #[test]
    fn test_stale_plan_changes_nothing() {
        let (mut event, mut catalog, rum_id) = setup(4);
        let plan = plan_completion(&event, &catalog).unwrap();
        if let Some(rum) = catalog.ingredient_mut(&rum_id) {
            rum.lots[0].remaining_quantity = Decimal::from(100);
        }
        let before = catalog.clone();

        let result = apply_completion(plan, &mut event, &mut catalog);
        assert!(matches!(result, Err(CompletionError::Stock(_))));
        assert_eq!(catalog, before);
        assert_eq!(event.status, EventStatus::Planned);
    }

    #[test]
    fn test_plan_for_other_event_is_rejected() {
        let (event, catalog, _) = setup(4);
        let (mut other, mut other_catalog, _) = setup(4);
        let plan = plan_completion(&event, &catalog).unwrap();
        let result = apply_completion(plan, &mut other, &mut other_catalog);
        assert!(matches!(result, Err(CompletionError::EventMismatch { .. })));
    }

    #[test]
    fn test_unknown_ingredient_is_skipped() {
        let (mut event, mut catalog, _) = setup(1);
        let ghost = Uuid::new_v4();
        catalog.drinks[0]
            .recipe
            .push(RecipeLine::new(ghost, Decimal::from(5)));
        let outcome = complete_event(&mut event, &mut catalog).unwrap();
        assert_eq!(outcome.report().unwrap().unknown_ingredients, vec![ghost]);
    }
}
