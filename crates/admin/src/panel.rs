use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use farmstand_core::{DomainResult, Sku};
use farmstand_inventory::{InventoryStore, InventoryTransaction};

use crate::session::{SessionStore, SessionToken};

/// Staleness threshold for the admin stock view.
const STALE_AFTER_HOURS: i64 = 24;

/// Stock as the admin sees it, with a freshness hint.
///
/// `is_stale` is presentation policy only; nothing downstream branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockView {
    pub quantity: i64,
    pub last_updated: DateTime<Utc>,
    pub staleness_hours: i64,
    pub is_stale: bool,
}

impl StockView {
    fn at(quantity: i64, last_updated: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let staleness = now - last_updated;
        Self {
            quantity,
            last_updated,
            staleness_hours: staleness.num_hours(),
            is_stale: staleness > Duration::hours(STALE_AFTER_HOURS),
        }
    }
}

/// The stock adjustment interface. Every operation authenticates the caller's
/// session token before touching the store.
#[derive(Clone)]
pub struct AdminPanel {
    store: Arc<dyn InventoryStore>,
    sessions: Arc<SessionStore>,
}

impl AdminPanel {
    pub fn new(store: Arc<dyn InventoryStore>, sessions: Arc<SessionStore>) -> Self {
        Self { store, sessions }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Current stock for a SKU, annotated with how old the reading is.
    #[instrument(skip(self, token), fields(sku = %sku), err)]
    pub async fn view_current_stock(
        &self,
        token: &SessionToken,
        sku: &Sku,
    ) -> DomainResult<StockView> {
        self.sessions.require(token)?;
        let snapshot = self.store.stock_level(sku).await;
        Ok(StockView::at(snapshot.quantity, snapshot.as_of, Utc::now()))
    }

    /// Set a product's stock count. The store writes the new count and the
    /// matching log row atomically; the committed transaction is returned so
    /// the admin sees the recorded delta.
    #[instrument(skip(self, token, notes), fields(sku = %sku, new_quantity), err)]
    pub async fn adjust_stock(
        &self,
        token: &SessionToken,
        sku: &Sku,
        new_quantity: i64,
        notes: &str,
    ) -> DomainResult<InventoryTransaction> {
        self.sessions.require(token)?;
        let tx = self.store.set_stock(sku, new_quantity, notes).await?;
        info!(
            quantity_change = tx.quantity_change,
            new_stock = tx.new_stock,
            "stock adjusted"
        );
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmstand_catalog::{Category, EGG_DOZEN_SKU, Product};
    use farmstand_core::{DomainError, Money, ProductId};
    use farmstand_inventory::InMemoryInventoryStore;

    fn egg_sku() -> Sku {
        Sku::new(EGG_DOZEN_SKU).unwrap()
    }

    fn panel_with_eggs(stock: i64, updated_at: DateTime<Utc>) -> (AdminPanel, SessionToken) {
        let store = InMemoryInventoryStore::new();
        store.seed([Product::new(
            ProductId::new(),
            egg_sku(),
            "Fresh Eggs (dozen)",
            "",
            Category::Eggs,
            Money::from_dollars(6),
            stock,
            updated_at,
        )
        .unwrap()]);

        let sessions = Arc::new(SessionStore::new("hunter2"));
        let token = sessions.login("hunter2").unwrap();
        (AdminPanel::new(Arc::new(store), sessions), token)
    }

    #[tokio::test]
    async fn adjust_then_view_reflects_the_new_count() {
        let (panel, token) = panel_with_eggs(5, Utc::now());
        let sku = egg_sku();

        let tx = panel
            .adjust_stock(&token, &sku, 12, "morning collection")
            .await
            .unwrap();
        assert_eq!(tx.quantity_change, 7);

        let view = panel.view_current_stock(&token, &sku).await.unwrap();
        assert_eq!(view.quantity, 12);
        assert!(!view.is_stale);
    }

    #[tokio::test]
    async fn day_old_reading_is_flagged_stale() {
        let updated = Utc::now() - Duration::hours(30);
        let (panel, token) = panel_with_eggs(5, updated);

        let view = panel
            .view_current_stock(&token, &egg_sku())
            .await
            .unwrap();
        assert!(view.is_stale);
        assert!(view.staleness_hours >= 30);
    }

    #[tokio::test]
    async fn fresh_reading_is_not_stale() {
        let updated = Utc::now() - Duration::hours(2);
        let (panel, token) = panel_with_eggs(5, updated);

        let view = panel
            .view_current_stock(&token, &egg_sku())
            .await
            .unwrap();
        assert!(!view.is_stale);
    }

    #[tokio::test]
    async fn logged_out_token_cannot_adjust() {
        let (panel, token) = panel_with_eggs(5, Utc::now());
        panel.sessions().logout(&token);

        let err = panel
            .adjust_stock(&token, &egg_sku(), 12, "")
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);

        // The store was never touched.
        let fresh = panel.sessions().login("hunter2").unwrap();
        let view = panel.view_current_stock(&fresh, &egg_sku()).await.unwrap();
        assert_eq!(view.quantity, 5);
    }

    #[tokio::test]
    async fn view_requires_authentication_too() {
        let (panel, token) = panel_with_eggs(5, Utc::now());
        panel.sessions().logout(&token);

        let err = panel
            .view_current_stock(&token, &egg_sku())
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);
    }
}
