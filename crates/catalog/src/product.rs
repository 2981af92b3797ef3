use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use farmstand_core::{DomainError, Money, ProductId, Sku};

/// Well-known SKU of the standard dozen-egg product.
pub const EGG_DOZEN_SKU: &str = "EGG-DOZ-001";

/// Product category.
///
/// The numeric ids are stable and mirror the persisted `category_id` column:
/// eggs are 1, chick breeds are 2. Each chick breed is its own SKU within
/// the `Chicks` category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Eggs,
    Chicks,
}

impl Category {
    pub const fn id(self) -> i32 {
        match self {
            Category::Eggs => 1,
            Category::Chicks => 2,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Category::Eggs),
            2 => Some(Category::Chicks),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Eggs => "eggs",
            Category::Chicks => "chicks",
        }
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eggs" => Ok(Category::Eggs),
            "chicks" => Ok(Category::Chicks),
            other => Err(DomainError::validation(format!(
                "unknown category: {other:?}"
            ))),
        }
    }
}

/// A sellable product record.
///
/// Mutated only through the Adjustment Interface; never hard-deleted
/// (deactivated via `is_active`). Stock and price are invariant-checked at
/// construction: neither may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: Sku,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: Money,
    pub current_stock: i64,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProductId,
        sku: Sku,
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        price: Money,
        current_stock: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if price.is_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if current_stock < 0 {
            return Err(DomainError::invalid_quantity("stock cannot be negative"));
        }

        Ok(Self {
            id,
            sku,
            name,
            description: description.into(),
            category,
            price,
            current_stock,
            is_active: true,
            updated_at,
        })
    }

    /// A product is purchasable when it is active and has stock on hand.
    pub fn is_available(&self) -> bool {
        self.is_active && self.current_stock > 0
    }
}
