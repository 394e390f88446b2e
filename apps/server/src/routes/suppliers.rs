//! Supplier directory routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router};
use serde::Deserialize;

use bookpos_core::{Supplier, ValidationError};
use bookpos_db::repository::NewSupplier;

use crate::error::ApiResult;
use crate::state::AppState;

// Merged at the root rather than nested: the supplier paths share the /api
// prefix but not a common segment of their own.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/Supplier", axum::routing::get(list_suppliers))
        .route("/api/addSupplier", axum::routing::post(create_supplier))
}

async fn list_suppliers(State(state): State<AppState>) -> ApiResult<Json<Vec<Supplier>>> {
    Ok(Json(state.db.suppliers().list().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSupplierRequest {
    company_name: Option<String>,
    items_provided: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
    rating: Option<i64>,
}

async fn create_supplier(
    State(state): State<AppState>,
    Json(body): Json<CreateSupplierRequest>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    let company_name = body
        .company_name
        .ok_or_else(|| ValidationError::required("companyName"))?;

    let supplier = state
        .db
        .suppliers()
        .create(NewSupplier {
            company_name,
            items_provided: body.items_provided,
            address: body.address,
            phone_number: body.phone_number,
            email: body.email,
            rating: body.rating,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}
