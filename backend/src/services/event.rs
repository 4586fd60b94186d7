//! Event service for planning and completing catered events

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    complete_event, simulate, validate_event_plan, validate_profit_margin, CompletionOutcome,
    Event, GuestCount, SimulationInput, SimulationResult,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{check_field, AppError, AppResult};
use crate::services::simulation::{staff_members, StaffInput};
use crate::store::Store;

/// Event service for the planned to completed lifecycle
#[derive(Clone)]
pub struct EventService {
    store: Store,
}

/// Input for creating a planned event
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub num_adults: u32,
    #[serde(default)]
    pub num_children: u32,
    pub selected_drink_ids: Vec<Uuid>,
    #[serde(default)]
    pub staff: Vec<StaffInput>,
}

/// Current cost estimate of a stored event
#[derive(Debug, Clone, Serialize)]
pub struct EventEstimate {
    pub event_id: Uuid,
    pub duration_hours: Decimal,
    #[serde(flatten)]
    pub result: SimulationResult,
}

impl EventService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create_event(&self, company_id: Uuid, input: CreateEventInput) -> AppResult<Event> {
        input.validate()?;
        let guests = GuestCount::new(input.num_adults, input.num_children);
        check_field(
            "event",
            validate_event_plan(
                &input.name,
                input.start_time,
                input.end_time,
                &input.selected_drink_ids,
                guests,
            ),
        )?;
        let staff = staff_members(input.staff)?;

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        if let Some(unknown) = input
            .selected_drink_ids
            .iter()
            .find(|id| book.catalog.drink(id).is_none())
        {
            return Err(AppError::NotFound(format!("Drink {}", unknown)));
        }

        let event = Event::planned(
            input.name.trim(),
            input.start_time,
            input.end_time,
            guests,
            input.selected_drink_ids,
            staff,
        );
        book.events.push(event.clone());

        tracing::info!("Planned event {} ({})", event.name, event.id);
        Ok(event)
    }

    /// Events ordered by start time
    pub async fn list_events(&self, company_id: Uuid) -> AppResult<Vec<Event>> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        let mut events = book.events.clone();
        events.sort_by_key(|event| event.start_time);
        Ok(events)
    }

    pub async fn get_event(&self, company_id: Uuid, event_id: Uuid) -> AppResult<Event> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        book.event(&event_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Event".to_string()))
    }

    /// Cost the event as it stands against current stock
    pub async fn estimate(
        &self,
        company_id: Uuid,
        event_id: Uuid,
        profit_margin_percent: Decimal,
    ) -> AppResult<EventEstimate> {
        check_field("profit_margin_percent", validate_profit_margin(profit_margin_percent))?;

        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        let event = book
            .event(&event_id)
            .ok_or_else(|| AppError::NotFound("Event".to_string()))?;

        let duration_hours = event.duration_hours();
        let result = simulate(
            &book.catalog,
            &SimulationInput {
                drink_ids: event.selected_drink_ids.clone(),
                guests: event.guests(),
                duration_hours,
                staff: event.staff.clone(),
                profit_margin_percent,
            },
        );
        Ok(EventEstimate {
            event_id,
            duration_hours,
            result,
        })
    }

    /// Complete the event and deplete the stock it used
    ///
    /// The company book stays locked for the whole completion, so concurrent
    /// completions drawing on the same lots run one after the other.
    pub async fn complete(&self, company_id: Uuid, event_id: Uuid) -> AppResult<CompletionOutcome> {
        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let (event, catalog) = book
            .event_and_catalog_mut(&event_id)
            .ok_or_else(|| AppError::NotFound("Event".to_string()))?;

        Ok(complete_event(event, catalog)?)
    }

    pub async fn delete_event(&self, company_id: Uuid, event_id: Uuid) -> AppResult<()> {
        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let removed = book
            .remove_event(&event_id)
            .ok_or_else(|| AppError::NotFound("Event".to_string()))?;

        tracing::info!("Deleted event {} ({})", removed.name, removed.id);
        Ok(())
    }
}
