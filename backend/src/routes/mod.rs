//! Route definitions for the Bar Costing Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/companies/:company_id", company_routes())
}

/// Everything scoped to one company
fn company_routes() -> Router<AppState> {
    Router::new()
        .nest("/ingredients", ingredient_routes())
        .nest("/drinks", drink_routes())
        .nest("/inventory", inventory_routes())
        .nest("/simulations", simulation_routes())
        .nest("/events", event_routes())
}

/// Ingredient routes
fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/:ingredient_id",
            get(handlers::get_ingredient)
                .put(handlers::update_ingredient)
                .delete(handlers::delete_ingredient),
        )
}

/// Drink routes
fn drink_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_drinks).post(handlers::create_drink))
        .route(
            "/:drink_id",
            get(handlers::get_drink)
                .put(handlers::update_drink)
                .delete(handlers::delete_drink),
        )
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_inventory))
        .route("/alerts", get(handlers::get_low_stock_alerts))
        .route("/:ingredient_id", get(handlers::get_inventory_item))
        .route(
            "/:ingredient_id/lots",
            get(handlers::list_lots).post(handlers::add_lot),
        )
        .route("/:ingredient_id/adjust", post(handlers::adjust_stock))
}

/// Simulation routes
fn simulation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::run_simulation))
        .route("/save", post(handlers::save_simulation))
}

/// Event routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_events).post(handlers::create_event))
        .route(
            "/:event_id",
            get(handlers::get_event).delete(handlers::delete_event),
        )
        .route("/:event_id/estimate", get(handlers::estimate_event))
        .route("/:event_id/complete", post(handlers::complete_event))
}
