//! Catalog module: product records, categories, and pickup options.
//!
//! Pure domain data only: no IO, no HTTP, no persistence concerns.

pub mod pickup;
pub mod product;

pub use pickup::{PaymentMethod, PickupOption};
pub use product::{Category, EGG_DOZEN_SKU, Product};
