//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{LowStockAlert, PurchaseLot};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::inventory::{
    AddLotInput, AdjustStockInput, AdjustmentResult, InventoryItem, InventoryService,
};
use crate::AppState;

/// Get the inventory overview
pub async fn get_inventory(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.overview(company_id).await?))
}

/// Get low stock alerts
pub async fn get_low_stock_alerts(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<Vec<LowStockAlert>>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.alerts(company_id).await?))
}

/// Get the stock position of one ingredient
pub async fn get_inventory_item(
    State(state): State<AppState>,
    Path((company_id, ingredient_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<InventoryItem>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.item(company_id, ingredient_id).await?))
}

/// Get purchase history, newest first
pub async fn list_lots(
    State(state): State<AppState>,
    Path((company_id, ingredient_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Vec<PurchaseLot>>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.lot_history(company_id, ingredient_id).await?))
}

/// Book a purchase lot
pub async fn add_lot(
    State(state): State<AppState>,
    Path((company_id, ingredient_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<AddLotInput>,
) -> AppResult<(StatusCode, Json<PurchaseLot>)> {
    let service = InventoryService::new(state.store);
    let lot = service.add_lot(company_id, ingredient_id, input).await?;
    Ok((StatusCode::CREATED, Json(lot)))
}

/// Remove stock by hand
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path((company_id, ingredient_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<AdjustmentResult>> {
    let service = InventoryService::new(state.store);
    Ok(Json(service.adjust(company_id, ingredient_id, input).await?))
}
