//! `farmstand-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod money;
pub mod sku;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use money::Money;
pub use sku::Sku;
