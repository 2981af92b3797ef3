use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farmstand_core::ProductId;

/// Kind of inventory transaction.
///
/// Only manual adjustments exist today; the enum leaves room for sale or
/// restock kinds without a schema change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Adjustment,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Adjustment => "adjustment",
        }
    }
}

/// One row of the append-only inventory transaction log.
///
/// Written exactly once per successful `set_stock`, in the same transactional
/// scope as the product update. Never mutated or deleted afterwards.
///
/// Invariant: `new_stock = previous_stock + quantity_change`, and `new_stock`
/// equals the product's stock at the moment the row was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: i64,
    pub product_id: ProductId,
    pub kind: TransactionKind,
    pub quantity_change: i64,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl InventoryTransaction {
    /// Check the delta bookkeeping invariant.
    pub fn is_balanced(&self) -> bool {
        self.previous_stock + self.quantity_change == self.new_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_when_delta_matches_snapshots() {
        let tx = InventoryTransaction {
            id: 1,
            product_id: ProductId::new(),
            kind: TransactionKind::Adjustment,
            quantity_change: 7,
            previous_stock: 5,
            new_stock: 12,
            notes: "morning collection".to_string(),
            created_at: Utc::now(),
        };
        assert!(tx.is_balanced());
    }

    #[test]
    fn unbalanced_when_snapshots_disagree() {
        let tx = InventoryTransaction {
            id: 1,
            product_id: ProductId::new(),
            kind: TransactionKind::Adjustment,
            quantity_change: 7,
            previous_stock: 5,
            new_stock: 11,
            notes: String::new(),
            created_at: Utc::now(),
        };
        assert!(!tx.is_balanced());
    }
}
