use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use farmstand_catalog::{Category, Product};
use farmstand_core::{DomainError, DomainResult, Sku};

use crate::store::{InventoryStore, StockSnapshot};
use crate::transaction::{InventoryTransaction, TransactionKind};

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<Sku, Product>,
    log: Vec<InventoryTransaction>,
    next_tx_id: i64,
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Both halves of `set_stock` happen under a single
/// write guard, which gives the same all-or-nothing behavior the Postgres
/// store gets from a database transaction.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<Inner>,
    #[cfg(test)]
    fail_next_log_append: std::sync::atomic::AtomicBool,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load seed products. Seeding happens out of band; products are only
    /// ever mutated through `set_stock` afterwards.
    pub fn seed(&self, products: impl IntoIterator<Item = Product>) {
        if let Ok(mut inner) = self.inner.write() {
            for p in products {
                inner.products.insert(p.sku.clone(), p);
            }
        }
    }

    /// Snapshot of the full transaction log, oldest first.
    pub fn transactions(&self) -> Vec<InventoryTransaction> {
        self.inner
            .read()
            .map(|inner| inner.log.clone())
            .unwrap_or_default()
    }

    /// Force the next `set_stock` to fail between the stock write and the
    /// log append, to exercise the rollback path.
    #[cfg(test)]
    fn arm_log_failure(&self) {
        self.fail_next_log_append
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }

    #[cfg(test)]
    fn log_failure_armed(&self) -> bool {
        self.fail_next_log_append
            .swap(false, std::sync::atomic::Ordering::SeqCst)
    }

    #[cfg(not(test))]
    fn log_failure_armed(&self) -> bool {
        false
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn stock_level(&self, sku: &Sku) -> StockSnapshot {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => return StockSnapshot::empty(),
        };

        match inner.products.get(sku) {
            Some(p) if p.is_active => StockSnapshot::new(p.current_stock, p.updated_at),
            _ => StockSnapshot::empty(),
        }
    }

    async fn aggregate_stock(&self, category: Category) -> StockSnapshot {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => return StockSnapshot::empty(),
        };

        let mut total = 0i64;
        let mut latest = None;
        for p in inner.products.values() {
            if p.category != category || !p.is_active {
                continue;
            }
            total += p.current_stock;
            latest = match latest {
                Some(t) if t >= p.updated_at => Some(t),
                _ => Some(p.updated_at),
            };
        }

        match latest {
            Some(as_of) => StockSnapshot::new(total, as_of),
            None => StockSnapshot::empty(),
        }
    }

    async fn list_available(&self, category: Category) -> Vec<Product> {
        let inner = match self.inner.read() {
            Ok(inner) => inner,
            Err(_) => return vec![],
        };

        let mut products: Vec<Product> = inner
            .products
            .values()
            .filter(|p| p.category == category && p.is_available())
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    async fn get_product(&self, sku: &Sku) -> DomainResult<Product> {
        let inner = self
            .inner
            .read()
            .map_err(|_| DomainError::store_unavailable("lock poisoned"))?;

        inner
            .products
            .get(sku)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

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

        let mut inner = self
            .inner
            .write()
            .map_err(|_| DomainError::store_unavailable("lock poisoned"))?;

        let product = inner.products.get_mut(sku).ok_or(DomainError::NotFound)?;

        let previous_stock = product.current_stock;
        let previous_updated_at = product.updated_at;
        let product_id = product.id;
        let now = Utc::now();

        // Stock write.
        product.current_stock = new_quantity;
        product.updated_at = now;

        // Rollback when the log append cannot happen: the stock write and
        // the log row commit together or not at all.
        if self.log_failure_armed() {
            if let Some(product) = inner.products.get_mut(sku) {
                product.current_stock = previous_stock;
                product.updated_at = previous_updated_at;
            }
            return Err(DomainError::store_unavailable(
                "log append failed; stock write rolled back",
            ));
        }

        // Log append.
        inner.next_tx_id += 1;
        let tx = InventoryTransaction {
            id: inner.next_tx_id,
            product_id,
            kind: TransactionKind::Adjustment,
            quantity_change: new_quantity - previous_stock,
            previous_stock,
            new_stock: new_quantity,
            notes: notes.to_string(),
            created_at: now,
        };
        inner.log.push(tx.clone());

        Ok(tx)
    }
}
