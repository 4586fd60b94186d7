//! HTTP handlers for event endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{CompletionOutcome, Event};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::event::{CreateEventInput, EventEstimate, EventService};
use crate::AppState;

#[derive(Deserialize)]
pub struct EstimateQuery {
    pub profit_margin_percent: Option<Decimal>,
}

/// List events by start time
pub async fn list_events(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<Vec<Event>>> {
    let service = EventService::new(state.store);
    Ok(Json(service.list_events(company_id).await?))
}

/// Create a planned event
pub async fn create_event(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(input): Json<CreateEventInput>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let service = EventService::new(state.store);
    let event = service.create_event(company_id, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event
pub async fn get_event(
    State(state): State<AppState>,
    Path((company_id, event_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Event>> {
    let service = EventService::new(state.store);
    Ok(Json(service.get_event(company_id, event_id).await?))
}

/// Cost an event against current stock
pub async fn estimate_event(
    State(state): State<AppState>,
    Path((company_id, event_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<EstimateQuery>,
) -> AppResult<Json<EventEstimate>> {
    let margin = query
        .profit_margin_percent
        .unwrap_or(state.config.simulation.profit_margin_percent);
    let service = EventService::new(state.store);
    Ok(Json(service.estimate(company_id, event_id, margin).await?))
}

/// Complete an event and deplete its stock
pub async fn complete_event(
    State(state): State<AppState>,
    Path((company_id, event_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<CompletionOutcome>> {
    let service = EventService::new(state.store);
    Ok(Json(service.complete(company_id, event_id).await?))
}

/// Delete an event
pub async fn delete_event(
    State(state): State<AppState>,
    Path((company_id, event_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = EventService::new(state.store);
    service.delete_event(company_id, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
