use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use farmstand_catalog::{PaymentMethod, PickupOption};
use farmstand_core::{DomainError, DomainResult, Sku};
use farmstand_inventory::InventoryStore;
use farmstand_pricing::{CartLineItem, OrderQuote, price_order};

/// Who is picking the order up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerContact {
    /// All three fields are required before any stock is touched.
    fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::missing_contact(field));
            }
        }
        Ok(())
    }
}

/// One requested line, as submitted by the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub sku: Sku,
    pub quantity: i64,
}

/// The accepted order, echoed back to the customer.
///
/// Not persisted anywhere. The farm follows up over email/phone; stock is
/// only decremented when an admin records the actual handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub contact: CustomerContact,
    pub quote: OrderQuote,
    pub payment: PaymentMethod,
    pub notes: String,
    pub message: String,
}

/// Order intake service.
///
/// Stateless apart from the store handle; safe to share across requests.
#[derive(Clone)]
pub struct OrderIntake {
    store: Arc<dyn InventoryStore>,
}

impl OrderIntake {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Validate and price an order.
    ///
    /// Fail-fast order: contact fields, then cart non-emptiness, then a
    /// fresh stock read per line. Quotes the customer saw earlier are never
    /// trusted; every line is re-checked against the store here.
    #[instrument(skip(self, contact, notes), fields(lines = lines.len(), pickup = ?pickup), err)]
    pub async fn submit_order(
        &self,
        contact: CustomerContact,
        lines: &[OrderLineRequest],
        pickup: PickupOption,
        payment: PaymentMethod,
        notes: &str,
    ) -> DomainResult<OrderConfirmation> {
        contact.validate()?;

        if lines.is_empty() {
            return Err(DomainError::EmptyOrder);
        }

        let mut cart = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity <= 0 {
                return Err(DomainError::invalid_quantity(format!(
                    "quantity for {} must be positive (got {})",
                    line.sku, line.quantity
                )));
            }
            let product = self.store.get_product(&line.sku).await?;
            if !product.is_available() || line.quantity > product.current_stock {
                return Err(DomainError::insufficient_stock(line.sku.clone()));
            }
            cart.push(CartLineItem::from_product(&product, line.quantity));
        }

        let quote = price_order(&cart, pickup)?;
        let message = next_steps_message(&contact, &quote, payment);

        info!(
            customer = %contact.name,
            total_cents = quote.grand_total.cents(),
            "order accepted"
        );

        Ok(OrderConfirmation {
            contact,
            quote,
            payment,
            notes: notes.to_string(),
            message,
        })
    }
}

fn next_steps_message(
    contact: &CustomerContact,
    quote: &OrderQuote,
    payment: PaymentMethod,
) -> String {
    format!(
        "Thanks {name}! Your order total is ${total}. Pick up at {location} ({pickup}). \
         We'll confirm by email at {email} and accept {payment} at handoff.",
        name = contact.name,
        total = quote.grand_total,
        location = quote.pickup.location(),
        pickup = quote.pickup.display_name(),
        email = contact.email,
        payment = payment.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use farmstand_catalog::{Category, EGG_DOZEN_SKU, Product};
    use farmstand_core::{Money, ProductId};
    use farmstand_inventory::InMemoryInventoryStore;

    fn seeded_store() -> Arc<InMemoryInventoryStore> {
        let store = InMemoryInventoryStore::new();
        store.seed([Product::new(
            ProductId::new(),
            Sku::new(EGG_DOZEN_SKU).unwrap(),
            "Fresh Eggs (dozen)",
            "Grade AA, collected daily",
            Category::Eggs,
            Money::from_dollars(6),
            5,
            Utc::now(),
        )
        .unwrap()]);
        Arc::new(store)
    }

    fn intake() -> OrderIntake {
        OrderIntake::new(seeded_store())
    }

    fn contact() -> CustomerContact {
        CustomerContact {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn egg_line(quantity: i64) -> OrderLineRequest {
        OrderLineRequest {
            sku: Sku::new(EGG_DOZEN_SKU).unwrap(),
            quantity,
        }
    }

    #[tokio::test]
    async fn happy_path_prices_and_confirms() {
        let confirmation = intake()
            .submit_order(
                contact(),
                &[egg_line(3)],
                PickupOption::LockerDowntown,
                PaymentMethod::Venmo,
                "",
            )
            .await
            .unwrap();

        assert_eq!(confirmation.quote.grand_total, Money::from_cents(1850));
        assert!(confirmation.message.contains("18.50"));
        assert!(confirmation.message.contains("Dana"));
    }

    #[tokio::test]
    async fn missing_contact_fails_before_stock_is_read() {
        let mut c = contact();
        c.email = "  ".to_string();
        let err = intake()
            .submit_order(
                c,
                &[egg_line(1)],
                PickupOption::FarmPickup,
                PaymentMethod::Cash,
                "",
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::missing_contact("email"));
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_after_contact() {
        let err = intake()
            .submit_order(
                contact(),
                &[],
                PickupOption::FarmPickup,
                PaymentMethod::Cash,
                "",
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::EmptyOrder);
    }

    #[tokio::test]
    async fn oversell_reports_the_offending_sku() {
        // Seed stock for eggs is 5 dozen.
        let err = intake()
            .submit_order(
                contact(),
                &[egg_line(6)],
                PickupOption::FarmersMarket,
                PaymentMethod::Cash,
                "",
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::insufficient_stock(Sku::new(EGG_DOZEN_SKU).unwrap())
        );
    }

    #[tokio::test]
    async fn unknown_sku_is_not_found() {
        let err = intake()
            .submit_order(
                contact(),
                &[OrderLineRequest {
                    sku: Sku::new("NO-SUCH-SKU").unwrap(),
                    quantity: 1,
                }],
                PickupOption::FarmPickup,
                PaymentMethod::Cash,
                "",
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn zero_quantity_line_is_invalid() {
        let err = intake()
            .submit_order(
                contact(),
                &[egg_line(0)],
                PickupOption::FarmPickup,
                PaymentMethod::Cash,
                "",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(_)));
    }

    #[tokio::test]
    async fn submission_does_not_touch_stock() {
        let store = seeded_store();
        let intake = OrderIntake::new(store.clone());
        let sku = Sku::new(EGG_DOZEN_SKU).unwrap();
        let before = store.stock_level(&sku).await.quantity;

        intake
            .submit_order(
                contact(),
                &[egg_line(2)],
                PickupOption::FarmPickup,
                PaymentMethod::Cash,
                "",
            )
            .await
            .unwrap();

        assert_eq!(store.stock_level(&sku).await.quantity, before);
        assert!(store.transactions().is_empty());
    }
}
