//! Postgres-backed inventory store.
//!
//! `set_stock` is the one operation that needs a real transactional boundary:
//! it locks the product row (`SELECT ... FOR UPDATE`), updates the stock, and
//! inserts the matching `inventory_transactions` row inside a single database
//! transaction. Two concurrent adjustments therefore serialize on the row
//! lock and the `previous_stock` recorded in the log always matches the value
//! actually overwritten.
//!
//! ## Error mapping
//!
//! Reads degrade: connection or query failure on `stock_level`,
//! `aggregate_stock`, and `list_available` yields the zero-stock/empty view
//! (with a warning log) rather than an error, so callers see "sold out or
//! unreachable" as one state. Writes do not degrade: any sqlx failure maps to
//! `DomainError::StoreUnavailable` and the caller must not assume the stock
//! was updated.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{instrument, warn};

use farmstand_catalog::{Category, Product};
use farmstand_core::{DomainError, DomainResult, ProductId, Sku};

use crate::store::{InventoryStore, StockSnapshot};
use crate::transaction::{InventoryTransaction, TransactionKind};

/// Postgres-backed inventory store.
///
/// Thread-safe: all operations go through the sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: Arc<PgPool>,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn map_sqlx_error(operation: &str, e: sqlx::Error) -> DomainError {
    DomainError::store_unavailable(format!("{operation}: {e}"))
}

fn product_from_row(row: &PgRow) -> Result<Product, DomainError> {
    let decode = |e: sqlx::Error| DomainError::store_unavailable(format!("decode product: {e}"));

    let sku: String = row.try_get("sku").map_err(decode)?;
    let category_id: i32 = row.try_get("category_id").map_err(decode)?;
    let category = Category::from_id(category_id)
        .ok_or_else(|| DomainError::validation(format!("unknown category_id {category_id}")))?;

    Ok(Product {
        id: ProductId::from_uuid(row.try_get("id").map_err(decode)?),
        sku: Sku::new(sku)?,
        name: row.try_get("name").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
        category,
        price: farmstand_core::Money::from_cents(row.try_get("price_cents").map_err(decode)?),
        current_stock: row.try_get("current_stock").map_err(decode)?,
        is_active: row.try_get("is_active").map_err(decode)?,
        updated_at: row.try_get("updated_date").map_err(decode)?,
    })
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    #[instrument(skip(self), fields(sku = %sku))]
    async fn stock_level(&self, sku: &Sku) -> StockSnapshot {
        let result = sqlx::query(
            r#"
            SELECT current_stock, updated_date
            FROM products
            WHERE sku = $1 AND is_active = TRUE
            "#,
        )
        .bind(sku.as_str())
        .fetch_optional(&*self.pool)
        .await;

        match result {
            Ok(Some(row)) => {
                let quantity = row.try_get::<i64, _>("current_stock");
                let as_of = row.try_get::<DateTime<Utc>, _>("updated_date");
                match (quantity, as_of) {
                    (Ok(quantity), Ok(as_of)) => StockSnapshot::new(quantity, as_of),
                    (Err(e), _) | (_, Err(e)) => {
                        warn!("stock_level degraded to zero snapshot: decode failed: {e}");
                        StockSnapshot::empty()
                    }
                }
            }
            Ok(None) => StockSnapshot::empty(),
            Err(e) => {
                warn!("stock_level degraded to zero snapshot: {e}");
                StockSnapshot::empty()
            }
        }
    }

    #[instrument(skip(self), fields(category = category.as_str()))]
    async fn aggregate_stock(&self, category: Category) -> StockSnapshot {
        // SUM(bigint) is NUMERIC in Postgres; cast back so the column
        // decodes as i64.
        let result = sqlx::query(
            r#"
            SELECT COALESCE(SUM(current_stock), 0)::BIGINT AS total_stock,
                   MAX(updated_date) AS last_updated
            FROM products
            WHERE category_id = $1 AND is_active = TRUE
            "#,
        )
        .bind(category.id())
        .fetch_one(&*self.pool)
        .await;

        match result {
            Ok(row) => {
                let quantity = row.try_get::<i64, _>("total_stock");
                let last_updated = row.try_get::<Option<DateTime<Utc>>, _>("last_updated");
                match (quantity, last_updated) {
                    (Ok(quantity), Ok(Some(as_of))) => StockSnapshot::new(quantity, as_of),
                    (Ok(_), Ok(None)) => StockSnapshot::empty(),
                    (Err(e), _) | (_, Err(e)) => {
                        warn!("aggregate_stock degraded to zero snapshot: decode failed: {e}");
                        StockSnapshot::empty()
                    }
                }
            }
            Err(e) => {
                warn!("aggregate_stock degraded to zero snapshot: {e}");
                StockSnapshot::empty()
            }
        }
    }

    #[instrument(skip(self), fields(category = category.as_str()))]
    async fn list_available(&self, category: Category) -> Vec<Product> {
        let result = sqlx::query(
            r#"
            SELECT id, sku, name, description, category_id, price_cents,
                   current_stock, is_active, updated_date
            FROM products
            WHERE category_id = $1 AND is_active = TRUE AND current_stock > 0
            ORDER BY name ASC
            "#,
        )
        .bind(category.id())
        .fetch_all(&*self.pool)
        .await;

        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                warn!("list_available degraded to empty list: {e}");
                return vec![];
            }
        };

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            match product_from_row(row) {
                Ok(p) => products.push(p),
                Err(e) => warn!("skipping undecodable product row: {e}"),
            }
        }
        products
    }

    #[instrument(skip(self), fields(sku = %sku), err)]
    async fn get_product(&self, sku: &Sku) -> DomainResult<Product> {
        let row = sqlx::query(
            r#"
            SELECT id, sku, name, description, category_id, price_cents,
                   current_stock, is_active, updated_date
            FROM products
            WHERE sku = $1
            "#,
        )
        .bind(sku.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_product", e))?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(DomainError::NotFound),
        }
    }

    #[instrument(skip(self, notes), fields(sku = %sku, new_quantity), err)]
    async fn set_stock(
        &self,
        sku: &Sku,
        new_quantity: i64,
        notes: &str,
    ) -> DomainResult<InventoryTransaction> {
        if new_quantity < 0 {
            return Err(DomainError::invalid_quantity(format!(
                "stock cannot be set below zero (got {new_quantity})"
            )));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin", e))?;

        // Row lock: concurrent adjustments serialize here, so the
        // previous-stock snapshot cannot go stale before the update.
        let row = sqlx::query("SELECT id, current_stock FROM products WHERE sku = $1 FOR UPDATE")
            .bind(sku.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("lock product", e))?;

        let Some(row) = row else {
            return Err(DomainError::NotFound);
        };

        let product_id: uuid::Uuid = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("decode id", e))?;
        let previous_stock: i64 = row
            .try_get("current_stock")
            .map_err(|e| map_sqlx_error("decode current_stock", e))?;
        let now = Utc::now();

        sqlx::query("UPDATE products SET current_stock = $1, updated_date = $2 WHERE id = $3")
            .bind(new_quantity)
            .bind(now)
            .bind(product_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update stock", e))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO inventory_transactions
                (product_id, transaction_type, quantity_change, previous_stock, new_stock, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(product_id)
        .bind(TransactionKind::Adjustment.as_str())
        .bind(new_quantity - previous_stock)
        .bind(previous_stock)
        .bind(new_quantity)
        .bind(notes)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert transaction", e))?;

        let tx_id: i64 = inserted
            .try_get("id")
            .map_err(|e| map_sqlx_error("decode transaction id", e))?;

        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;

        Ok(InventoryTransaction {
            id: tx_id,
            product_id: ProductId::from_uuid(product_id),
            kind: TransactionKind::Adjustment,
            quantity_change: new_quantity - previous_stock,
            previous_stock,
            new_stock: new_quantity,
            notes: notes.to_string(),
            created_at: now,
        })
    }
}
