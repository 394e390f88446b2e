//! Dashboard routes: buyer identification, sale recording, stock decrement
//! and the revenue/top-sold aggregates.

use axum::extract::{Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use bookpos_core::revenue::{self, Period};
use bookpos_core::validation::validate_line_items;
use bookpos_core::{LineItem, Money, TOP_SOLD_LIMIT};
use bookpos_db::repository::StockDecrement;

use crate::dto::{sales_to_dto, BuyerOptionDto};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getname", post(get_name))
        .route("/sales", post(create_sale))
        .route("/subitemquantity", put(sub_item_quantity))
        .route("/gettopsolditems", get(top_sold_items))
        .route("/Buyerdropdown", get(buyer_dropdown))
        .route("/revenue", get(revenue_report))
}

// =============================================================================
// Buyer identification
// =============================================================================

#[derive(Debug, Deserialize)]
struct GetNameRequest {
    rfid: Option<i64>,
}

/// Resolves a scanned RFID tag against the staff directory.
async fn get_name(
    State(state): State<AppState>,
    Json(body): Json<GetNameRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let rfid = body
        .rfid
        .ok_or_else(|| bookpos_core::ValidationError::required("rfid"))?;

    let user = state
        .db
        .users()
        .get_by_rfid(rfid)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Invalid RFID. Please Report to the ICT Department".to_string())
        })?;

    Ok(Json(json!({ "fname": user.fname, "lname": user.lname })))
}

// =============================================================================
// Sale recording
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSaleRequest {
    buyer_name: Option<String>,
    items_bought: Option<Vec<LineItem>>,
    rfid: Option<i64>,
}

/// Records a sale: resolves (or creates) the buyer, then persists one sale
/// event per line item atomically. Stock is decremented by a separate call
/// to `/subitemquantity`.
async fn create_sale(
    State(state): State<AppState>,
    Json(body): Json<CreateSaleRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let buyer_name = body.buyer_name.unwrap_or_default();
    let items = body.items_bought.unwrap_or_default();

    // The whole payload is checked up front: a bad item list must not leave a
    // freshly created buyer row behind.
    validate_line_items(
        items
            .iter()
            .map(|item| (item.product_name.as_str(), item.quantity)),
    )?;

    let buyer = state
        .db
        .buyers()
        .resolve(&buyer_name, body.rfid, state.rfid_policy)
        .await?;

    let recorded = state
        .db
        .sales()
        .record(buyer.buyer_id, &items, body.rfid)
        .await?;

    info!(
        buyer_id = buyer.buyer_id,
        line_items = recorded,
        "sale recorded"
    );

    Ok(Json(json!({ "message": "Sales history recorded successfully" })))
}

// =============================================================================
// Stock decrement
// =============================================================================

#[derive(Debug, Deserialize)]
struct CartItemDto {
    id: i64,
    quantity: i64,
    // Sent by the frontend cart; the decrement targets the id only.
    #[allow(dead_code)]
    product_name: Option<String>,
}

/// Applies the cart's stock decrements, all-or-nothing.
async fn sub_item_quantity(
    State(state): State<AppState>,
    Json(items): Json<Vec<CartItemDto>>,
) -> ApiResult<Json<serde_json::Value>> {
    let decrements: Vec<StockDecrement> = items
        .iter()
        .map(|item| StockDecrement {
            id: item.id,
            quantity: item.quantity,
        })
        .collect();

    state.db.products().decrement_stock(&decrements).await?;

    Ok(Json(json!({ "message": "Quantities updated successfully" })))
}

// =============================================================================
// Aggregates
// =============================================================================

/// Top five products by units sold.
async fn top_sold_items(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let items = state.db.sales().top_sold(TOP_SOLD_LIMIT).await?;
    Ok(Json(json!(items)))
}

/// Buyers that have no RFID linked yet, for manual selection at the till.
async fn buyer_dropdown(State(state): State<AppState>) -> ApiResult<Json<Vec<BuyerOptionDto>>> {
    let buyers = state.db.buyers().without_rfid().await?;
    Ok(Json(buyers.into_iter().map(BuyerOptionDto::from).collect()))
}

#[derive(Debug, Deserialize)]
struct RevenueQuery {
    period: Option<String>,
}

/// The revenue report.
///
/// `period=day|week|month` returns the window bounds, the total, a 7-slot
/// per-weekday breakdown and the enriched sale list. `period=weekly-revenue`
/// additionally splits the current month into its four fixed buckets and
/// reports one sum per bucket.
///
/// All sums are in cents and priced against the *current* catalog
/// (as-of-time pricing; see bookpos-core::revenue).
async fn revenue_report(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    // An unrecognized period fails before any data is read.
    let period = Period::parse(query.period.as_deref().unwrap_or(""))?;

    let now = Utc::now();
    let window = period.window(now);

    let sales = state.db.sales().in_window(&window).await?;
    let prices = state
        .db
        .products()
        .prices_by_name(&distinct_product_names(&sales))
        .await?;
    let summary = revenue::summarize(&sales, &prices);

    let daily: Vec<i64> = summary.daily.iter().map(Money::cents).collect();

    let mut response = json!({
        "period": period.as_str(),
        "startDate": window.start,
        "endDate": window.end,
        "totalRevenue": summary.total.cents(),
        "dailyRevenue": daily,
        "salesHistory": sales_to_dto(sales),
    });

    if period == Period::WeeklyRevenue {
        // One sum per fixed month bucket, each computed independently.
        let mut weekly = Vec::with_capacity(4);
        for bucket in Period::month_buckets(now) {
            let bucket_sales = state.db.sales().in_window(&bucket).await?;
            let bucket_prices = state
                .db
                .products()
                .prices_by_name(&distinct_product_names(&bucket_sales))
                .await?;
            weekly.push(revenue::summarize(&bucket_sales, &bucket_prices).total.cents());
        }
        response["weeklyRevenue"] = json!(weekly);
    }

    Ok(Json(response))
}

fn distinct_product_names(sales: &[bookpos_core::SaleLine]) -> Vec<String> {
    let mut names: Vec<String> = sales.iter().map(|s| s.product_name.clone()).collect();
    names.sort();
    names.dedup();
    names
}
