//! Staff directory route. Read-only: the service never writes to the staff
//! table, it only lists active non-student members for the admin screen.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use bookpos_core::StaffMember;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<StaffMember>>> {
    Ok(Json(state.db.users().list_staff().await?))
}
