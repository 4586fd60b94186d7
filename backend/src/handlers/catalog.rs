//! HTTP handlers for ingredient and drink endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::Ingredient;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::catalog::{
    CatalogService, CreateIngredientInput, DrinkInput, DrinkView, UpdateIngredientInput,
};
use crate::AppState;

/// List ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let service = CatalogService::new(state.store);
    Ok(Json(service.list_ingredients(company_id).await?))
}

/// Create an ingredient
pub async fn create_ingredient(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(input): Json<CreateIngredientInput>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let service = CatalogService::new(state.store);
    let ingredient = service.create_ingredient(company_id, input).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// Get an ingredient
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path((company_id, ingredient_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Ingredient>> {
    let service = CatalogService::new(state.store);
    Ok(Json(service.get_ingredient(company_id, ingredient_id).await?))
}

/// Update an ingredient
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path((company_id, ingredient_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateIngredientInput>,
) -> AppResult<Json<Ingredient>> {
    let service = CatalogService::new(state.store);
    Ok(Json(
        service
            .update_ingredient(company_id, ingredient_id, input)
            .await?,
    ))
}

/// Delete an ingredient
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path((company_id, ingredient_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = CatalogService::new(state.store);
    service.delete_ingredient(company_id, ingredient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List drinks
pub async fn list_drinks(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<Vec<DrinkView>>> {
    let service = CatalogService::new(state.store);
    Ok(Json(service.list_drinks(company_id).await?))
}

/// Create a drink
pub async fn create_drink(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(input): Json<DrinkInput>,
) -> AppResult<(StatusCode, Json<DrinkView>)> {
    let service = CatalogService::new(state.store);
    let drink = service.create_drink(company_id, input).await?;
    Ok((StatusCode::CREATED, Json(drink)))
}

/// Get a drink
pub async fn get_drink(
    State(state): State<AppState>,
    Path((company_id, drink_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<DrinkView>> {
    let service = CatalogService::new(state.store);
    Ok(Json(service.get_drink(company_id, drink_id).await?))
}

/// Replace a drink
pub async fn update_drink(
    State(state): State<AppState>,
    Path((company_id, drink_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<DrinkInput>,
) -> AppResult<Json<DrinkView>> {
    let service = CatalogService::new(state.store);
    Ok(Json(service.update_drink(company_id, drink_id, input).await?))
}

/// Delete a drink
pub async fn delete_drink(
    State(state): State<AppState>,
    Path((company_id, drink_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = CatalogService::new(state.store);
    service.delete_drink(company_id, drink_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
