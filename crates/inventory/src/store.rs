use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farmstand_catalog::{Category, Product};
use farmstand_core::{DomainResult, Sku};

use crate::transaction::InventoryTransaction;

/// A point-in-time view of stock for a product or category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub quantity: i64,
    pub as_of: DateTime<Utc>,
}

impl StockSnapshot {
    pub fn new(quantity: i64, as_of: DateTime<Utc>) -> Self {
        Self { quantity, as_of }
    }

    /// The view callers get when a product is missing, inactive, or the
    /// store is unreachable. Indistinguishable from sold-out by design.
    pub fn empty() -> Self {
        Self {
            quantity: 0,
            as_of: Utc::now(),
        }
    }
}

/// Storage seam for product stock and the adjustment log.
///
/// Reads are eventually-consistent snapshots; callers must tolerate a
/// slightly stale count. `set_stock` is the one operation with a real
/// transactional boundary: the stock write and the log append commit
/// together or not at all, so concurrent adjustments cannot produce a lost
/// update (the `previous_stock` recorded in the log always matches the value
/// actually overwritten).
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Current stock for one SKU. Missing, inactive, and unreachable all
    /// degrade to a zero-quantity snapshot rather than an error.
    async fn stock_level(&self, sku: &Sku) -> StockSnapshot;

    /// Total stock across all active products in a category, with the most
    /// recent update time. Zero snapshot when the category is empty.
    async fn aggregate_stock(&self, category: Category) -> StockSnapshot;

    /// Active, in-stock products in a category, ordered by name ascending.
    async fn list_available(&self, category: Category) -> Vec<Product>;

    /// Full product record, for re-pricing and stock re-validation.
    async fn get_product(&self, sku: &Sku) -> DomainResult<Product>;

    /// Set a product's stock to `new_quantity` and append the matching log
    /// row atomically. Returns the committed transaction.
    ///
    /// Errors: `NotFound` for an unknown SKU, `InvalidQuantity` for a
    /// negative quantity, `StoreUnavailable` on transport failure (in which
    /// case the caller must not assume the stock was updated).
    async fn set_stock(
        &self,
        sku: &Sku,
        new_quantity: i64,
        notes: &str,
    ) -> DomainResult<InventoryTransaction>;
}
