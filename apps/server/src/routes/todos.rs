//! Todo routes, gated by the bearer-token middleware.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Deserialize;

use bookpos_core::{Todo, ValidationError};

use crate::error::ApiResult;
use crate::middleware::require_bearer;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo))
        .layer(middleware::from_fn(require_bearer))
}

async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.db.todos().list().await?))
}

async fn get_todo(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Todo>> {
    let todo = state
        .db
        .todos()
        .get(id)
        .await?
        .ok_or_else(|| crate::error::ApiError::NotFound(format!("Todo {id} not found")))?;
    Ok(Json(todo))
}

#[derive(Debug, Deserialize)]
struct CreateTodoRequest {
    title: Option<String>,
}

async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let title = body
        .title
        .ok_or_else(|| ValidationError::required("title"))?;
    let todo = state.db.todos().create(&title).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

#[derive(Debug, Deserialize)]
struct UpdateTodoRequest {
    title: Option<String>,
    completed: Option<bool>,
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    let todo = state
        .db
        .todos()
        .update(id, body.title.as_deref(), body.completed)
        .await?;
    Ok(Json(todo))
}

async fn delete_todo(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Todo>> {
    Ok(Json(state.db.todos().delete(id).await?))
}
