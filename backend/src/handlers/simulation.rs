//! HTTP handlers for simulation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::Event;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::simulation::{
    SaveSimulationInput, SimulationReport, SimulationRequest, SimulationService,
};
use crate::AppState;

fn service(state: AppState) -> SimulationService {
    SimulationService::new(
        state.store,
        state.config.simulation.clone(),
        state.config.currency.clone(),
    )
}

/// Run a simulation
pub async fn run_simulation(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(request): Json<SimulationRequest>,
) -> AppResult<Json<SimulationReport>> {
    Ok(Json(service(state).run(company_id, request).await?))
}

/// Save a simulation as a planned event
pub async fn save_simulation(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(input): Json<SaveSimulationInput>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = service(state).save_as_event(company_id, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
