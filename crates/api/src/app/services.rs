//! Service wiring: picks the inventory backend and shares the domain
//! services across handlers via an `Extension`.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use farmstand_admin::{AdminPanel, SessionStore};
use farmstand_catalog::{Category, EGG_DOZEN_SKU, Product};
use farmstand_core::{Money, ProductId, Sku};
use farmstand_inventory::{InMemoryInventoryStore, InventoryStore, PostgresInventoryStore};
use farmstand_orders::OrderIntake;

#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn InventoryStore>,
    pub intake: OrderIntake,
    pub panel: AdminPanel,
    pub sessions: Arc<SessionStore>,
}

/// `DATABASE_URL` present selects Postgres; otherwise an in-memory store
/// seeded with the farm's standing catalog (dev/test).
pub async fn build_services(
    admin_password: String,
    database_url: Option<String>,
) -> anyhow::Result<AppServices> {
    let store: Arc<dyn InventoryStore> = match database_url {
        Some(url) => {
            let pool = PgPool::connect(&url).await?;
            Arc::new(PostgresInventoryStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory inventory with seed data");
            let store = InMemoryInventoryStore::new();
            store.seed(seed_products()?);
            Arc::new(store)
        }
    };

    let sessions = Arc::new(SessionStore::new(admin_password));

    Ok(AppServices {
        intake: OrderIntake::new(store.clone()),
        panel: AdminPanel::new(store.clone(), sessions.clone()),
        store,
        sessions,
    })
}

/// The farm's standing catalog: one egg product, chick breeds as their own
/// SKUs. Mirrors the Postgres seed.
fn seed_products() -> anyhow::Result<Vec<Product>> {
    let now = Utc::now();
    let product = |sku: &str, name: &str, description: &str, category, price, stock| {
        Ok::<Product, anyhow::Error>(Product::new(
            ProductId::new(),
            Sku::new(sku)?,
            name,
            description,
            category,
            price,
            stock,
            now,
        )?)
    };

    Ok(vec![
        product(
            EGG_DOZEN_SKU,
            "Fresh Eggs (dozen)",
            "Grade AA, collected daily",
            Category::Eggs,
            Money::from_dollars(6),
            5,
        )?,
        product(
            "CHICK-AUS-001",
            "Australorp",
            "Calm dual-purpose layer",
            Category::Chicks,
            Money::from_dollars(8),
            4,
        )?,
        product(
            "CHICK-RIR-001",
            "Rhode Island Red",
            "Hardy brown-egg layer",
            Category::Chicks,
            Money::from_dollars(5),
            6,
        )?,
        product(
            "CHICK-BO-001",
            "Buff Orpington",
            "Friendly heritage breed",
            Category::Chicks,
            Money::from_dollars(7),
            3,
        )?,
    ])
}
