//! Supplier directory: plain CRUD, no relationship to products.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bookpos_core::validation::validate_company_name;
use bookpos_core::Supplier;

/// Fields accepted when registering a supplier.
#[derive(Debug, Clone, Default)]
pub struct NewSupplier {
    pub company_name: String,
    pub items_provided: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists all suppliers.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, company_name, items_provided, address, phone_number, email, rating
            FROM suppliers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Registers a supplier. Only the company name is required.
    pub async fn create(&self, new: NewSupplier) -> DbResult<Supplier> {
        let company_name = validate_company_name(&new.company_name)?;

        debug!(company_name = %company_name, "creating supplier");

        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (company_name, items_provided, address, phone_number, email, rating)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&company_name)
        .bind(&new.items_provided)
        .bind(&new.address)
        .bind(&new.phone_number)
        .bind(&new.email)
        .bind(new.rating)
        .execute(&self.pool)
        .await?;

        Ok(Supplier {
            id: result.last_insert_rowid(),
            company_name,
            items_provided: new.items_provided,
            address: new.address,
            phone_number: new.phone_number,
            email: new.email,
            rating: new.rating,
        })
    }
}
