//! # Product Repository
//!
//! Catalog CRUD, stock adjustment and the price-sheet lookup the revenue
//! engine joins against.
//!
//! Stock is a plain signed counter: decrements are not clamped at zero, so a
//! sale recorded against stale stock data can drive `quantity` negative. The
//! dashboard's low-stock count surfaces that; it is not rejected here.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use bookpos_core::validation::validate_product_name;
use bookpos_core::{Money, Product};

/// One stock decrement within a batch: `quantity` units consumed of the
/// product with catalog id `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDecrement {
    pub id: i64,
    pub quantity: i64,
}

/// Repository for catalog and stock operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, product_name, quantity, selling_price_cents, date FROM inventory ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, product_name, quantity, selling_price_cents, date FROM inventory WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Adds a product to the catalog.
    pub async fn create(
        &self,
        product_name: &str,
        quantity: i64,
        selling_price_cents: i64,
    ) -> DbResult<Product> {
        let product_name = validate_product_name(product_name)?;
        let date = Utc::now();

        debug!(product_name = %product_name, quantity, "creating product");

        let result = sqlx::query(
            r#"
            INSERT INTO inventory (product_name, quantity, selling_price_cents, date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&product_name)
        .bind(quantity)
        .bind(selling_price_cents)
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            product_name,
            quantity,
            selling_price_cents,
            date,
        })
    }

    /// Updates a product's name, stock and price.
    pub async fn update(
        &self,
        id: i64,
        product_name: &str,
        quantity: i64,
        selling_price_cents: i64,
    ) -> DbResult<()> {
        let product_name = validate_product_name(product_name)?;

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET product_name = ?2, quantity = ?3, selling_price_cents = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product_name)
        .bind(quantity)
        .bind(selling_price_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product from the catalog.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Applies a batch of stock decrements atomically: all succeed or none
    /// are applied. An unknown product id aborts the whole batch. Stock is
    /// not clamped and may go negative.
    pub async fn decrement_stock(&self, items: &[StockDecrement]) -> DbResult<()> {
        debug!(decrements = items.len(), "decrementing stock");

        let mut tx = self.pool.begin().await?;

        for item in items {
            let result = sqlx::query("UPDATE inventory SET quantity = quantity - ?2 WHERE id = ?1")
                .bind(item.id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back every earlier decrement.
                return Err(DbError::not_found("Product", item.id));
            }
        }

        tx.commit().await?;

        Ok(())
    }

    /// Total units on hand across the whole catalog (dashboard widget).
    pub async fn total_quantity(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Number of products at or below the given stock threshold.
    pub async fn low_stock_count(&self, threshold: i64) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory WHERE quantity <= ?1")
                .bind(threshold)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Current selling price per product name, for the given names.
    ///
    /// This is the price sheet the revenue engine joins sale events against.
    /// Names with no catalog row are simply absent from the map (they price
    /// at zero downstream). Duplicate catalog names collapse to the last row.
    pub async fn prices_by_name(&self, names: &[String]) -> DbResult<HashMap<String, Money>> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder = sqlx::QueryBuilder::new(
            "SELECT product_name, selling_price_cents FROM inventory WHERE product_name IN (",
        );
        let mut separated = builder.separated(", ");
        for name in names {
            separated.push_bind(name);
        }
        builder.push(") ORDER BY id");

        let rows = builder.build().fetch_all(&self.pool).await?;

        let mut prices = HashMap::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("product_name")?;
            let cents: i64 = row.try_get("selling_price_cents")?;
            prices.insert(name, Money::from_cents(cents));
        }

        Ok(prices)
    }
}
