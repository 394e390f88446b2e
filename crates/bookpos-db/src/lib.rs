//! # bookpos-db: Database Layer for the Bookstore POS
//!
//! All database operations live here, behind repository types that own a
//! clone of the SQLite connection pool.
//!
//! ## Responsibilities
//! - Connection pool management (WAL mode, foreign keys on)
//! - Embedded schema migrations
//! - Repository implementations, one per entity
//! - Transaction management for multi-row writes (sale batches, stock
//!   decrements): either every row commits or none do
//!
//! Not responsible for: business rules (bookpos-core) or HTTP formatting
//! (apps/server).
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./bookpos.db")).await?;
//! let buyer = db.buyers().resolve("Ana", Some(4211), Default::default()).await?;
//! db.sales().record(buyer.buyer_id, &items, Some(4211)).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
