//! Inventory service for stock levels, purchases and manual adjustments

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    adjust_stock, is_low_stock, low_stock_alerts, receive_lot, valuate, AdjustmentReason,
    DepletionPlan, Ingredient, LowStockAlert, NewLot, PurchaseLot, StockAdjustment,
    StockValuation, Unit,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Inventory service for managing purchase lots and stock levels
#[derive(Clone)]
pub struct InventoryService {
    store: Store,
}

/// Stock position of one ingredient
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItem {
    pub ingredient_id: Uuid,
    pub name: String,
    pub unit: Unit,
    pub is_alcoholic: bool,
    #[serde(flatten)]
    pub valuation: StockValuation,
    pub low_stock_threshold: Option<Decimal>,
    pub is_low_stock: bool,
    pub lot_count: usize,
}

impl InventoryItem {
    fn new(ingredient: &Ingredient) -> Self {
        Self {
            ingredient_id: ingredient.id,
            name: ingredient.name.clone(),
            unit: ingredient.unit,
            is_alcoholic: ingredient.is_alcoholic,
            valuation: valuate(ingredient),
            low_stock_threshold: ingredient.low_stock_threshold,
            is_low_stock: is_low_stock(ingredient),
            lot_count: ingredient.lots.len(),
        }
    }
}

/// Input for booking a purchase
#[derive(Debug, Deserialize)]
pub struct AddLotInput {
    /// Purchase date, today when omitted
    pub date: Option<NaiveDate>,
    pub quantity: Decimal,
    pub total_price: Decimal,
}

/// Input for a manual stock removal
#[derive(Debug, Deserialize, Validate)]
pub struct AdjustStockInput {
    pub quantity: Decimal,
    #[serde(default)]
    pub reason: AdjustmentReason,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

/// Outcome of a manual adjustment
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentResult {
    pub plan: DepletionPlan,
    pub item: InventoryItem,
}

impl InventoryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Stock position of every ingredient, lowest stock first among flagged ones
    pub async fn overview(&self, company_id: Uuid) -> AppResult<Vec<InventoryItem>> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        let mut items: Vec<InventoryItem> = book.catalog.ingredients.iter().map(InventoryItem::new).collect();
        items.sort_by(|a, b| {
            b.is_low_stock
                .cmp(&a.is_low_stock)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(items)
    }

    pub async fn item(&self, company_id: Uuid, ingredient_id: Uuid) -> AppResult<InventoryItem> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        book.catalog
            .ingredient(&ingredient_id)
            .map(InventoryItem::new)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))
    }

    pub async fn alerts(&self, company_id: Uuid) -> AppResult<Vec<LowStockAlert>> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        Ok(low_stock_alerts(&book.catalog.ingredients))
    }

    /// Purchase history, newest first
    pub async fn lot_history(&self, company_id: Uuid, ingredient_id: Uuid) -> AppResult<Vec<PurchaseLot>> {
        let book = self.store.book(company_id).await;
        let book = book.lock().await;
        let ingredient = book
            .catalog
            .ingredient(&ingredient_id)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;
        Ok(ingredient.lots_newest_first().into_iter().cloned().collect())
    }

    pub async fn add_lot(
        &self,
        company_id: Uuid,
        ingredient_id: Uuid,
        input: AddLotInput,
    ) -> AppResult<PurchaseLot> {
        let new_lot = NewLot {
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
            quantity: input.quantity,
            total_price: input.total_price,
        };

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let ingredient = book
            .catalog
            .ingredient_mut(&ingredient_id)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        let lot = receive_lot(ingredient, new_lot)?;
        Ok(lot.clone())
    }

    /// Remove stock by hand; refused outright when stock cannot cover it
    pub async fn adjust(
        &self,
        company_id: Uuid,
        ingredient_id: Uuid,
        input: AdjustStockInput,
    ) -> AppResult<AdjustmentResult> {
        input.validate()?;
        let adjustment = StockAdjustment {
            quantity: input.quantity,
            reason: input.reason,
            note: input.note,
        };

        let book = self.store.book(company_id).await;
        let mut book = book.lock().await;
        let ingredient = book
            .catalog
            .ingredient_mut(&ingredient_id)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        let plan = adjust_stock(ingredient, &adjustment)?;
        Ok(AdjustmentResult {
            plan,
            item: InventoryItem::new(ingredient),
        })
    }
}
