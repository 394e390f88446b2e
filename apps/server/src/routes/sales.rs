//! Sales history routes: the full ledger and a per-buyer filter.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use bookpos_core::ValidationError;

use crate::dto::{sales_to_dto, SaleDto};
use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/SalesHistory", get(sales_history))
        .route("/BuyerHistory", get(buyer_history))
}

/// Every recorded sale line, newest first, with buyer names resolved.
async fn sales_history(State(state): State<AppState>) -> ApiResult<Json<Vec<SaleDto>>> {
    let sales = state.db.sales().history().await?;
    Ok(Json(sales_to_dto(sales)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuyerHistoryQuery {
    buyer_name: Option<String>,
}

/// Sale lines for one buyer, matched by exact display name.
async fn buyer_history(
    State(state): State<AppState>,
    Query(query): Query<BuyerHistoryQuery>,
) -> ApiResult<Json<Vec<SaleDto>>> {
    let buyer_name = query
        .buyer_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ValidationError::required("buyerName"))?;

    let sales = state.db.sales().history_for_buyer(&buyer_name).await?;
    Ok(Json(sales_to_dto(sales)))
}
