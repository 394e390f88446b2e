//! Inventory catalog routes: CRUD plus the total-stock and low-stock
//! dashboard counters.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use bookpos_core::{Product, ValidationError, LOW_STOCK_THRESHOLD};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", axum::routing::put(update_product).delete(delete_product))
        .route("/total", get(total_supplies))
        .route("/low-stock", get(low_stock))
}

#[derive(Debug, Deserialize)]
struct ProductRequest {
    product_name: Option<String>,
    quantity: Option<i64>,
    selling_price_cents: Option<i64>,
}

impl ProductRequest {
    /// All three fields are required on create and update alike.
    fn into_parts(self) -> Result<(String, i64, i64), ValidationError> {
        let name = self
            .product_name
            .ok_or_else(|| ValidationError::required("product_name"))?;
        let quantity = self
            .quantity
            .ok_or_else(|| ValidationError::required("quantity"))?;
        let price = self
            .selling_price_cents
            .ok_or_else(|| ValidationError::required("selling_price_cents"))?;
        Ok((name, quantity, price))
    }
}

async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list().await?))
}

async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let (name, quantity, price) = body.into_parts()?;
    let product = state.db.products().create(&name, quantity, price).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ProductRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let (name, quantity, price) = body.into_parts()?;
    state.db.products().update(id, &name, quantity, price).await?;
    Ok(Json(json!({ "message": "Product updated successfully" })))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.db.products().delete(id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

/// Sum of on-hand quantity across the catalog.
async fn total_supplies(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let total = state.db.products().total_quantity().await?;
    Ok(Json(json!({ "totalSupplies": total })))
}

/// Count of products at or below the low-stock threshold.
async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let count = state.db.products().low_stock_count(LOW_STOCK_THRESHOLD).await?;
    Ok(Json(json!({ "lowStockItems": count })))
}
