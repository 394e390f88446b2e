//! # Bookstore POS API Server
//!
//! HTTP API for the school bookstore point of sale: buyer identification by
//! RFID, sale recording, inventory CRUD, supplier tracking and dashboard
//! aggregates.
//!
//! ## Layout
//! - `config`: environment-driven server configuration
//! - `dto`: request/response DTOs and JSON mapping helpers
//! - `state`: shared per-request state (database handle + policies)
//! - `error`: `ApiError` and its mapping to status codes + JSON bodies
//! - `middleware`: the bearer-token presence gate
//! - `routes/`: one file per domain area

pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router (public entrypoint used by `main.rs`
/// and the integration tests).
pub fn app(state: AppState) -> Router {
    routes::router(state)
}
