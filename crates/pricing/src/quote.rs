use serde::{Deserialize, Serialize};

use farmstand_catalog::{PickupOption, Product};
use farmstand_core::{DomainError, DomainResult, Money, Sku};

/// One cart line as captured at quote time.
///
/// Ephemeral: built from a live [`Product`] read and never persisted. The
/// unit price and available stock are snapshots; intake re-reads the store
/// before confirming, so a stale quote can never oversell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub sku: Sku,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub available_stock: i64,
}

impl CartLineItem {
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            available_stock: product.current_stock,
        }
    }
}

/// A priced line within an [`OrderQuote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineQuote {
    pub sku: Sku,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// A fully priced order. Produced fresh per request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuote {
    pub lines: Vec<LineQuote>,
    pub pickup: PickupOption,
    pub pickup_fee: Money,
    pub subtotal: Money,
    pub grand_total: Money,
}

/// Price one line: `quantity * unit_price`.
///
/// Re-validates the quantity against the product's current stock even though
/// the UI only offers in-range quantities; pre-filtered choices are not
/// trusted.
pub fn price_line_item(product: &Product, quantity: i64) -> DomainResult<Money> {
    validate_quantity(quantity, product.current_stock)?;
    product.price.checked_mul(quantity)
}

/// Price a whole cart against a pickup option.
///
/// `grand_total = Σ line subtotals + pickup fee`. The pickup option only
/// ever contributes the flat fee term.
pub fn price_order(lines: &[CartLineItem], pickup: PickupOption) -> DomainResult<OrderQuote> {
    if lines.is_empty() {
        return Err(DomainError::EmptyOrder);
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal = Money::ZERO;
    for line in lines {
        validate_quantity(line.quantity, line.available_stock)?;
        let line_subtotal = line.unit_price.checked_mul(line.quantity)?;
        subtotal = subtotal.checked_add(line_subtotal)?;
        priced.push(LineQuote {
            sku: line.sku.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line_subtotal,
        });
    }

    let pickup_fee = pickup.fee();
    let grand_total = subtotal.checked_add(pickup_fee)?;

    Ok(OrderQuote {
        lines: priced,
        pickup,
        pickup_fee,
        subtotal,
        grand_total,
    })
}

fn validate_quantity(quantity: i64, available: i64) -> DomainResult<()> {
    if quantity <= 0 {
        return Err(DomainError::invalid_quantity(format!(
            "quantity must be positive (got {quantity})"
        )));
    }
    if quantity > available {
        return Err(DomainError::invalid_quantity(format!(
            "quantity {quantity} exceeds available stock {available}"
        )));
    }
    Ok(())
}
