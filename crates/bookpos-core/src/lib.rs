//! # bookpos-core: Pure Business Logic for the Bookstore POS
//!
//! This crate is the heart of the backend. It contains the domain types and
//! the revenue engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  apps/server (axum HTTP API)                    │
//! │   /api/Dashboard/*  /api/Products  /api/Sales/*  /todos ...     │
//! └──────────────────────────────┬──────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼──────────────────────────────────┐
//! │               ★ bookpos-core (THIS CRATE) ★                     │
//! │                                                                 │
//! │   ┌──────────┐  ┌─────────┐  ┌───────────┐  ┌────────────┐     │
//! │   │  types   │  │  money  │  │  revenue  │  │ validation │     │
//! │   │  Buyer   │  │  Money  │  │  Period   │  │   rules    │     │
//! │   │ SaleLine │  │ (cents) │  │  windows  │  │   checks   │     │
//! │   └──────────┘  └─────────┘  └───────────┘  └────────────┘     │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │
//! └──────────────────────────────┬──────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼──────────────────────────────────┐
//! │                  bookpos-db (Database Layer)                    │
//! │           SQLite queries, migrations, repositories              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Buyer, SaleLine, Product, Supplier, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`revenue`] - Reporting periods, time windows and revenue aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the revenue engine takes `now` as an argument so
//!    every window computation is deterministic and testable
//! 2. **Integer Money**: all monetary values are in cents (i64)
//! 3. **Explicit Errors**: all errors are typed, never strings or panics

pub mod error;
pub mod money;
pub mod revenue;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use revenue::{Period, RevenueSummary, Window};
pub use types::{
    Buyer, LineItem, Product, RfidConflictPolicy, SaleLine, StaffMember, Supplier, Todo,
    TopSoldItem,
};

/// Label used when a sale event's buyer reference cannot be resolved.
pub const UNKNOWN_BUYER: &str = "Unknown Buyer";

/// Stock level at or below which a product counts as "low stock" on the
/// dashboard.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many products the top-sold dashboard widget shows.
pub const TOP_SOLD_LIMIT: u32 = 5;
