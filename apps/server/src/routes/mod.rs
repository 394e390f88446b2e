//! Route assembly.
//!
//! ```text
//! /health                     liveness probe
//! /api/Dashboard/...          POS till: rfid lookup, sale recording, aggregates
//! /api/Products/...           inventory catalog
//! /api/Sales/...              sales history
//! /api/Supplier, /api/addSupplier
//! /api/Users                  staff directory
//! /todos/...                  bearer-gated todo scaffolding
//! ```

mod dashboard;
mod products;
mod sales;
mod suppliers;
mod todos;
mod users;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Builds the full application router with `state` attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/Dashboard", dashboard::router())
        .nest("/api/Products", products::router())
        .nest("/api/Sales", sales::router())
        .merge(suppliers::router())
        .nest("/api/Users", users::router())
        .nest("/todos", todos::router())
        .with_state(state)
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_ok = state.db.health_check().await;
    Json(json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "database": db_ok,
    }))
}
