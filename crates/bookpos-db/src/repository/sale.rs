//! # Sale Repository
//!
//! Append-only sale events, one row per line item.
//!
//! ## Batch Semantics
//! A sale request becomes one `sales_history` row per line item, all sharing
//! the same buyer id, the same RFID snapshot and the same timestamp. The
//! batch is inserted inside a single transaction: either every row commits or
//! none do, so there are no partial receipts.
//!
//! Recording does *not* check that the product exists in the catalog or that
//! stock is sufficient. Stock is decremented by a separate call (see
//! [`super::product::ProductRepository::decrement_stock`]); the two writes
//! are deliberately decoupled.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bookpos_core::revenue::Window;
use bookpos_core::validation::validate_line_items;
use bookpos_core::{LineItem, SaleLine, TopSoldItem};

/// Repository for sale event operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale: one row per line item, atomically.
    ///
    /// Validation runs before the transaction opens, so an invalid item
    /// anywhere in the list means zero rows are written. Returns the number
    /// of recorded line items.
    pub async fn record(
        &self,
        buyer_id: i64,
        items: &[LineItem],
        rfid: Option<i64>,
    ) -> DbResult<usize> {
        validate_line_items(
            items
                .iter()
                .map(|item| (item.product_name.as_str(), item.quantity)),
        )?;

        let sale_date = Utc::now();

        debug!(buyer_id, line_items = items.len(), "recording sale");

        let mut tx = self.pool.begin().await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO sales_history (buyer_id, product_name, quantity, rfid, sale_date)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(buyer_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(rfid)
            .bind(sale_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(items.len())
    }

    /// Lists the full sales history, newest first, with the buyer's name
    /// joined in. A dangling buyer reference yields a NULL name; the
    /// presentation layer substitutes the unknown-buyer label.
    pub async fn history(&self) -> DbResult<Vec<SaleLine>> {
        let sales = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT s.sale_id, b.buyer_name, s.product_name, s.quantity, s.sale_date
            FROM sales_history s
            LEFT JOIN buyers b ON b.buyer_id = s.buyer_id
            ORDER BY s.sale_date DESC, s.sale_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the sales history for one buyer, newest first.
    pub async fn history_for_buyer(&self, buyer_name: &str) -> DbResult<Vec<SaleLine>> {
        let sales = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT s.sale_id, b.buyer_name, s.product_name, s.quantity, s.sale_date
            FROM sales_history s
            LEFT JOIN buyers b ON b.buyer_id = s.buyer_id
            WHERE b.buyer_name = ?1
            ORDER BY s.sale_date DESC, s.sale_id DESC
            "#,
        )
        .bind(buyer_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists the sale events whose `sale_date` falls inside the inclusive
    /// window, with buyer names joined in. Feeds the revenue engine.
    pub async fn in_window(&self, window: &Window) -> DbResult<Vec<SaleLine>> {
        let sales = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT s.sale_id, b.buyer_name, s.product_name, s.quantity, s.sale_date
            FROM sales_history s
            LEFT JOIN buyers b ON b.buyer_id = s.buyer_id
            WHERE s.sale_date >= ?1 AND s.sale_date <= ?2
            ORDER BY s.sale_date ASC, s.sale_id ASC
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// The best-selling products by total units sold, descending.
    pub async fn top_sold(&self, limit: u32) -> DbResult<Vec<TopSoldItem>> {
        let items = sqlx::query_as::<_, TopSoldItem>(
            r#"
            SELECT product_name, SUM(quantity) AS total_quantity
            FROM sales_history
            GROUP BY product_name
            ORDER BY total_quantity DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
