//! Catalog service for ingredients and drinks

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    drink_cost_per_serving, is_alcoholic, validate_consumption_estimate,
    validate_low_stock_threshold, validate_name, validate_recipe, Catalog, ConsumptionEstimate,
    Drink, Ingredient, RecipeLine, Unit,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{check_field, AppError, AppResult};
use crate::store::Store;

/// Catalog service for managing a company's ingredients and drinks
#[derive(Clone)]
pub struct CatalogService {
    store: Store,
}

/// Input for creating an ingredient
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIngredientInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub unit: Unit,
    #[serde(default)]
    pub is_alcoholic: bool,
    pub low_stock_threshold: Option<Decimal>,
}

/// Input for editing an ingredient; lots are managed through inventory
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateIngredientInput {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub is_alcoholic: Option<bool>,
    /// Zero clears the threshold
    pub low_stock_threshold: Option<Decimal>,
}

/// Input for creating or replacing a drink
#[derive(Debug, Deserialize, Validate)]
pub struct DrinkInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub recipe: Vec<RecipeLine>,
    #[serde(default)]
    pub consumption_estimate: ConsumptionEstimate,
}

/// Drink with the values derived from the current catalog
#[derive(Debug, Clone, Serialize)]
pub struct DrinkView {
    #[serde(flatten)]
    pub drink: Drink,
    pub is_alcoholic: bool,
    pub cost_per_serving: Decimal,
}

impl DrinkView {
    fn new(drink: &Drink, catalog: &Catalog) -> Self {
        Self {
            drink: drink.clone(),
            is_alcoholic: is_alcoholic(drink, catalog),
            cost_per_serving: drink_cost_per_serving(drink, catalog),
        }
    }
}

impl CatalogService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // ========================================================================
    // Ingredients
    // ========================================================================

    pub async fn list_ingredients(&self, company_id: Uuid) -> AppResult<Vec<Ingredient>> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        let mut ingredients = book.catalog.ingredients.clone();
        ingredients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(ingredients)
    }

    pub async fn get_ingredient(&self, company_id: Uuid, ingredient_id: Uuid) -> AppResult<Ingredient> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        book.catalog
            .ingredient(&ingredient_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))
    }

    pub async fn create_ingredient(
        &self,
        company_id: Uuid,
        input: CreateIngredientInput,
    ) -> AppResult<Ingredient> {
        input.validate()?;
        check_field("name", validate_name(&input.name))?;
        check_field(
            "low_stock_threshold",
            validate_low_stock_threshold(input.low_stock_threshold),
        )?;

        let mut ingredient = Ingredient::new(input.name.trim(), input.unit, input.is_alcoholic);
        ingredient.low_stock_threshold = positive(input.low_stock_threshold);

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        book.catalog.ingredients.push(ingredient.clone());

        tracing::info!("Created ingredient {} ({})", ingredient.name, ingredient.id);
        Ok(ingredient)
    }

    pub async fn update_ingredient(
        &self,
        company_id: Uuid,
        ingredient_id: Uuid,
        input: UpdateIngredientInput,
    ) -> AppResult<Ingredient> {
        input.validate()?;
        if let Some(name) = &input.name {
            check_field("name", validate_name(name))?;
        }
        check_field(
            "low_stock_threshold",
            validate_low_stock_threshold(input.low_stock_threshold),
        )?;

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let ingredient = book
            .catalog
            .ingredient_mut(&ingredient_id)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        // Checked before any field is written
        if let Some(unit) = input.unit {
            if unit != ingredient.unit && !ingredient.lots.is_empty() {
                return Err(AppError::Conflict {
                    resource: "unit".to_string(),
                    message: "Cannot change the unit of an ingredient that has stock history"
                        .to_string(),
                    message_pt: "Não é possível alterar a unidade de um insumo com histórico de estoque"
                        .to_string(),
                });
            }
        }

        if let Some(name) = input.name {
            ingredient.name = name.trim().to_string();
        }
        if let Some(unit) = input.unit {
            ingredient.unit = unit;
        }
        if let Some(is_alcoholic) = input.is_alcoholic {
            ingredient.is_alcoholic = is_alcoholic;
        }
        if input.low_stock_threshold.is_some() {
            ingredient.low_stock_threshold = positive(input.low_stock_threshold);
        }

        Ok(ingredient.clone())
    }

    /// Delete an ingredient and drop it from every recipe that used it
    pub async fn delete_ingredient(&self, company_id: Uuid, ingredient_id: Uuid) -> AppResult<()> {
        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let removed = book
            .catalog
            .remove_ingredient(&ingredient_id)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        for drink in book.catalog.drinks.iter_mut() {
            drink.recipe.retain(|line| line.ingredient_id != ingredient_id);
        }

        tracing::info!("Deleted ingredient {} ({})", removed.name, removed.id);
        Ok(())
    }

    // ========================================================================
    // Drinks
    // ========================================================================

    pub async fn list_drinks(&self, company_id: Uuid) -> AppResult<Vec<DrinkView>> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        Ok(book
            .catalog
            .drinks
            .iter()
            .map(|drink| DrinkView::new(drink, &book.catalog))
            .collect())
    }

    pub async fn get_drink(&self, company_id: Uuid, drink_id: Uuid) -> AppResult<DrinkView> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        let drink = book
            .catalog
            .drink(&drink_id)
            .ok_or_else(|| AppError::NotFound("Drink".to_string()))?;
        Ok(DrinkView::new(drink, &book.catalog))
    }

    pub async fn create_drink(&self, company_id: Uuid, input: DrinkInput) -> AppResult<DrinkView> {
        validate_drink(&input)?;

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        ensure_ingredients_exist(&book.catalog, &input.recipe)?;

        let drink = Drink::new(input.name.trim(), input.recipe, input.consumption_estimate);
        book.catalog.drinks.push(drink.clone());

        tracing::info!("Created drink {} ({})", drink.name, drink.id);
        Ok(DrinkView::new(&drink, &book.catalog))
    }

    pub async fn update_drink(
        &self,
        company_id: Uuid,
        drink_id: Uuid,
        input: DrinkInput,
    ) -> AppResult<DrinkView> {
        validate_drink(&input)?;

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        ensure_ingredients_exist(&book.catalog, &input.recipe)?;

        let drink = book
            .catalog
            .drink_mut(&drink_id)
            .ok_or_else(|| AppError::NotFound("Drink".to_string()))?;
        drink.name = input.name.trim().to_string();
        drink.recipe = input.recipe;
        drink.consumption_estimate = input.consumption_estimate;
        let drink = drink.clone();

        Ok(DrinkView::new(&drink, &book.catalog))
    }

    /// Delete a drink and drop it from every event that selected it
    pub async fn delete_drink(&self, company_id: Uuid, drink_id: Uuid) -> AppResult<()> {
        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let removed = book
            .catalog
            .remove_drink(&drink_id)
            .ok_or_else(|| AppError::NotFound("Drink".to_string()))?;

        for event in book.events.iter_mut() {
            event.selected_drink_ids.retain(|id| *id != drink_id);
        }

        tracing::info!("Deleted drink {} ({})", removed.name, removed.id);
        Ok(())
    }
}

fn validate_drink(input: &DrinkInput) -> AppResult<()> {
    input.validate()?;
    check_field("name", validate_name(&input.name))?;
    check_field("recipe", validate_recipe(&input.recipe))?;
    check_field(
        "consumption_estimate",
        validate_consumption_estimate(&input.consumption_estimate),
    )
}

fn ensure_ingredients_exist(catalog: &Catalog, recipe: &[RecipeLine]) -> AppResult<()> {
    match recipe
        .iter()
        .find(|line| catalog.ingredient(&line.ingredient_id).is_none())
    {
        Some(line) => Err(AppError::NotFound(format!("Ingredient {}", line.ingredient_id))),
        None => Ok(()),
    }
}

/// Thresholds of zero mean no alert
fn positive(threshold: Option<Decimal>) -> Option<Decimal> {
    threshold.filter(|t| *t > Decimal::ZERO)
}
