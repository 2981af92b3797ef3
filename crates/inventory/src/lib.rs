//! Inventory store: persisted product stock plus the append-only
//! adjustment transaction log.
//!
//! The [`InventoryStore`] trait is the seam between the domain services and
//! storage. Two implementations ship: an in-memory store for tests/dev and a
//! Postgres-backed store for production.

pub mod in_memory;
pub mod postgres;
pub mod store;
pub mod transaction;

pub use in_memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;
pub use store::{InventoryStore, StockSnapshot};
pub use transaction::{InventoryTransaction, TransactionKind};
