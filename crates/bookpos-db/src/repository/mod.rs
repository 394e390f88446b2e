//! Repository implementations, one per entity.
//!
//! Each repository owns a clone of the connection pool and exposes async
//! operations returning [`crate::DbResult`]. Multi-row writes (sale batches,
//! stock decrements) open a transaction so they commit all-or-nothing.

pub mod buyer;
pub mod product;
pub mod sale;
pub mod supplier;
pub mod todo;
pub mod user;

pub use buyer::BuyerRepository;
pub use product::{ProductRepository, StockDecrement};
pub use sale::SaleRepository;
pub use supplier::{NewSupplier, SupplierRepository};
pub use todo::TodoRepository;
pub use user::UserRepository;
