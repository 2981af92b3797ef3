//! Request DTOs and JSON mapping helpers.
//!
//! Money renders both as integer `*_cents` fields and as a two-decimal
//! `*_display` string so no client ever does float math on prices.

use serde::Deserialize;
use serde_json::json;

use farmstand_catalog::{PaymentMethod, PickupOption, Product};
use farmstand_core::Sku;
use farmstand_inventory::{InventoryTransaction, StockSnapshot};
use farmstand_orders::CustomerContact;
use farmstand_pricing::OrderQuote;

#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub sku: Sku,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub lines: Vec<LineRequest>,
    pub pickup: PickupOption,
}

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub contact: CustomerContact,
    pub lines: Vec<LineRequest>,
    pub pickup: PickupOption,
    pub payment: PaymentMethod,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub new_quantity: i64,
    #[serde(default)]
    pub notes: String,
}

pub fn product_to_json(p: &Product) -> serde_json::Value {
    json!({
        "sku": p.sku.as_str(),
        "name": p.name,
        "description": p.description,
        "category": p.category.as_str(),
        "price_cents": p.price.cents(),
        "price_display": p.price.to_string(),
        "current_stock": p.current_stock,
    })
}

pub fn snapshot_to_json(s: &StockSnapshot) -> serde_json::Value {
    json!({
        "quantity": s.quantity,
        "as_of": s.as_of,
    })
}

pub fn quote_to_json(q: &OrderQuote) -> serde_json::Value {
    json!({
        "lines": q.lines.iter().map(|l| json!({
            "sku": l.sku.as_str(),
            "name": l.name,
            "quantity": l.quantity,
            "unit_price_cents": l.unit_price.cents(),
            "subtotal_cents": l.subtotal.cents(),
            "subtotal_display": l.subtotal.to_string(),
        })).collect::<Vec<_>>(),
        "pickup": q.pickup,
        "pickup_fee_cents": q.pickup_fee.cents(),
        "subtotal_cents": q.subtotal.cents(),
        "grand_total_cents": q.grand_total.cents(),
        "grand_total_display": q.grand_total.to_string(),
    })
}

pub fn transaction_to_json(tx: &InventoryTransaction) -> serde_json::Value {
    json!({
        "id": tx.id,
        "product_id": tx.product_id.to_string(),
        "kind": tx.kind.as_str(),
        "quantity_change": tx.quantity_change,
        "previous_stock": tx.previous_stock,
        "new_stock": tx.new_stock,
        "notes": tx.notes,
        "created_at": tx.created_at,
    })
}
