//! Simulation service for costing events before they exist

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    simulate, validate_event_plan, validate_name, validate_profit_margin, validate_staff_cost,
    Event, GuestCount, SimulationInput, SimulationResult, StaffMember,
};
use uuid::Uuid;
use validator::Validate;

use crate::config::SimulationDefaults;
use crate::error::{check_field, AppError, AppResult};
use crate::store::Store;

/// Simulation service; missing parameters fall back to configured defaults
#[derive(Clone)]
pub struct SimulationService {
    store: Store,
    defaults: SimulationDefaults,
    currency: String,
}

/// One staff line in a request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StaffInput {
    #[validate(length(min = 1, max = 80))]
    pub role: String,
    pub cost: Decimal,
}

impl StaffInput {
    pub(crate) fn into_member(self) -> StaffMember {
        StaffMember::new(self.role.trim(), self.cost)
    }
}

/// What-if parameters as sent by a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub drink_ids: Vec<Uuid>,
    pub num_adults: Option<u32>,
    pub num_children: Option<u32>,
    pub duration_hours: Option<Decimal>,
    #[serde(default)]
    pub staff: Vec<StaffInput>,
    pub profit_margin_percent: Option<Decimal>,
}

/// A simulation to keep as a planned event
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSimulationInput {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(flatten)]
    pub simulation: SimulationRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub input: SimulationInput,
    #[serde(flatten)]
    pub result: SimulationResult,
    pub currency: String,
}

impl SimulationService {
    pub fn new(store: Store, defaults: SimulationDefaults, currency: String) -> Self {
        Self {
            store,
            defaults,
            currency,
        }
    }

    /// Cost a hypothetical event against current stock without changing it
    pub async fn run(&self, company_id: Uuid, request: SimulationRequest) -> AppResult<SimulationReport> {
        let input = self.resolve(request)?;

        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        let result = simulate(&book.catalog, &input);

        tracing::debug!(
            "Simulated {} drinks for company {}: final price {}",
            input.drink_ids.len(),
            company_id,
            result.costs.final_price
        );
        Ok(SimulationReport {
            input,
            result,
            currency: self.currency.clone(),
        })
    }

    /// Save a simulation as a planned event with the simulated costs attached
    pub async fn save_as_event(&self, company_id: Uuid, save: SaveSimulationInput) -> AppResult<Event> {
        let input = self.resolve(save.simulation)?;
        check_field(
            "event",
            validate_event_plan(
                &save.name,
                save.start_time,
                save.end_time,
                &input.drink_ids,
                input.guests,
            ),
        )?;

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let result = simulate(&book.catalog, &input);
        if let Some(unknown) = result.projection.unknown_drinks.first() {
            return Err(AppError::NotFound(format!("Drink {}", unknown)));
        }

        let mut event = Event::planned(
            save.name.trim(),
            save.start_time,
            save.end_time,
            input.guests,
            input.drink_ids,
            input.staff,
        );
        event.simulated_costs = Some(result.costs);
        book.events.push(event.clone());

        tracing::info!(
            "Saved simulation as event {} ({}) priced at {} {}",
            event.name,
            event.id,
            result.costs.final_price,
            self.currency
        );
        Ok(event)
    }

    fn resolve(&self, request: SimulationRequest) -> AppResult<SimulationInput> {
        let duration_hours = request.duration_hours.unwrap_or(self.defaults.duration_hours);
        if duration_hours < Decimal::ZERO {
            return Err(AppError::validation(
                "duration_hours",
                "Duration cannot be negative",
                "A duração não pode ser negativa",
            ));
        }
        let profit_margin_percent = request
            .profit_margin_percent
            .unwrap_or(self.defaults.profit_margin_percent);
        check_field("profit_margin_percent", validate_profit_margin(profit_margin_percent))?;

        Ok(SimulationInput {
            drink_ids: request.drink_ids,
            guests: GuestCount::new(
                request.num_adults.unwrap_or(self.defaults.num_adults),
                request.num_children.unwrap_or(self.defaults.num_children),
            ),
            duration_hours,
            staff: staff_members(request.staff)?,
            profit_margin_percent,
        })
    }
}

/// Validate staff lines and turn them into members
pub(crate) fn staff_members(staff: Vec<StaffInput>) -> AppResult<Vec<StaffMember>> {
    staff
        .into_iter()
        .map(|line| -> AppResult<StaffMember> {
            line.validate()?;
            check_field("staff.role", validate_name(&line.role))?;
            check_field("staff.cost", validate_staff_cost(line.cost))?;
            Ok(line.into_member())
        })
        .collect()
}
