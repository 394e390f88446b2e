//! # Domain Types
//!
//! Core domain types used throughout the bookstore POS backend.
//!
//! ## Entity Relationships
//! ```text
//! ┌────────────┐ 1      n ┌──────────────┐   name   ┌────────────┐
//! │   Buyer    │──────────│ sale event   │─ ─ ─ ─ ─▶│  Product   │
//! │ buyer_id   │          │ buyer_id (FK)│  (loose  │ id         │
//! │ buyer_name │          │ product_name │   join)  │ product_   │
//! │ rfid?      │          │ quantity     │          │   name     │
//! └────────────┘          │ rfid? (snap) │          │ quantity   │
//!                         │ sale_date    │          │ price ¢    │
//!                         └──────────────┘          └────────────┘
//! ```
//!
//! Sale events reference Product by *name*, not by id. That loose coupling is
//! load-bearing: revenue reports join sale events against the current price
//! sheet by product name, and a sale for a name with no catalog match prices
//! at zero. Sale rows are written by raw binds in bookpos-db and read back as
//! [`SaleLine`] with the buyer's name joined in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Buyer
// =============================================================================

/// A buyer identity, created on first sighting at the till.
///
/// Invariants (enforced by UNIQUE constraints in the schema):
/// - at most one buyer per name
/// - at most one buyer per non-null RFID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Buyer {
    /// System-assigned identity, immutable.
    pub buyer_id: i64,

    /// Display name, unique and required.
    pub buyer_name: String,

    /// Alternate key: the numeric RFID tag value, if one has been linked.
    pub rfid: Option<i64>,
}

impl Buyer {
    /// Splits the display name into (first, last) on the first whitespace.
    ///
    /// The dashboard dropdown wants `fname`/`lname` fields; buyers store a
    /// single free-text name, so the last name is empty when there is no
    /// second word.
    pub fn split_name(&self) -> (&str, &str) {
        match self.buyer_name.split_once(' ') {
            Some((first, rest)) => (first, rest),
            None => (self.buyer_name.as_str(), ""),
        }
    }
}

/// Policy for the unresolved edge case in buyer resolution: an RFID is
/// presented for a name that already has a *different* RFID on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RfidConflictPolicy {
    /// Refuse the sale with a conflict error (HTTP 409).
    #[default]
    Reject,
    /// Re-point the buyer's stored RFID to the newly scanned tag.
    Overwrite,
}

impl std::str::FromStr for RfidConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(RfidConflictPolicy::Reject),
            "overwrite" => Ok(RfidConflictPolicy::Overwrite),
            other => Err(format!("unknown RFID conflict policy '{other}'")),
        }
    }
}

// =============================================================================
// Sale Events
// =============================================================================

/// One (product, quantity) pair within a sale request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_name: String,
    pub quantity: i64,
}

/// A sale event enriched with the buyer's name, as listed by the sales
/// history endpoints and the revenue report.
///
/// `buyer_name` is `None` when the buyer row is missing (dangling reference);
/// presentation substitutes [`crate::UNKNOWN_BUYER`]. `sale_date` is optional
/// so the aggregation can tolerate legacy rows without a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub sale_id: i64,
    pub buyer_name: Option<String>,
    pub product_name: String,
    pub quantity: i64,
    pub sale_date: Option<DateTime<Utc>>,
}

/// One row of the top-sold dashboard widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopSoldItem {
    pub product_name: String,
    pub total_quantity: i64,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the bookstore inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// System-assigned identity.
    pub id: i64,

    /// Display name. Also the de facto join key from sale events, so renaming
    /// a product silently detaches its sales history from the price sheet.
    pub product_name: String,

    /// Current stock on hand. Not clamped: a sale can drive it negative.
    pub quantity: i64,

    /// Current selling price in cents. There is no price history; revenue is
    /// always computed against this value.
    pub selling_price_cents: i64,

    /// When the product was added to the catalog.
    pub date: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as a Money value.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier record. Descriptive only; not related to products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub company_name: String,
    pub items_provided: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub rating: Option<i64>,
}

// =============================================================================
// Staff
// =============================================================================

/// A staff directory entry. Read-only for this service; the RFID lookup at
/// the till resolves scanned tags against this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StaffMember {
    pub id: i64,
    pub fname: String,
    pub lname: String,
    pub email: Option<String>,
    pub position: String,
    pub isactive: i64,
    pub rfid: Option<i64>,
}

// =============================================================================
// Todo
// =============================================================================

/// A todo item. Unrelated scaffolding kept behind the bearer gate; persisted
/// on the same store as everything else rather than in process memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        let buyer = Buyer {
            buyer_id: 1,
            buyer_name: "Ana Lopez".to_string(),
            rfid: None,
        };
        assert_eq!(buyer.split_name(), ("Ana", "Lopez"));

        let single = Buyer {
            buyer_id: 2,
            buyer_name: "Ana".to_string(),
            rfid: None,
        };
        assert_eq!(single.split_name(), ("Ana", ""));

        let triple = Buyer {
            buyer_id: 3,
            buyer_name: "Ana Maria Lopez".to_string(),
            rfid: None,
        };
        // Everything after the first space is the last name.
        assert_eq!(triple.split_name(), ("Ana", "Maria Lopez"));
    }

    #[test]
    fn test_rfid_conflict_policy_parse() {
        assert_eq!(
            "reject".parse::<RfidConflictPolicy>(),
            Ok(RfidConflictPolicy::Reject)
        );
        assert_eq!(
            "Overwrite".parse::<RfidConflictPolicy>(),
            Ok(RfidConflictPolicy::Overwrite)
        );
        assert!("merge".parse::<RfidConflictPolicy>().is_err());
    }
}
