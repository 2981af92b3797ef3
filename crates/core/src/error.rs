//! Domain error model.

use thiserror::Error;

use crate::sku::Sku;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// stock checks, the admin gate). Infrastructure failures surface through
/// `StoreUnavailable` so that callers never see transport-level error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested product/SKU does not exist.
    #[error("not found")]
    NotFound,

    /// A quantity was non-positive, negative, or otherwise malformed.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A requested quantity exceeds the stock currently on hand.
    #[error("insufficient stock for {0}")]
    InsufficientStock(Sku),

    /// An order was submitted or priced with no line items.
    #[error("order contains no line items")]
    EmptyOrder,

    /// A required customer contact field was empty.
    #[error("missing contact info: {0}")]
    MissingContactInfo(String),

    /// The backing store could not be reached; the caller must not assume
    /// any write took effect.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The admin gate rejected the request (bad password or unknown token).
    #[error("unauthorized")]
    Unauthorized,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn insufficient_stock(sku: Sku) -> Self {
        Self::InsufficientStock(sku)
    }

    pub fn missing_contact(field: impl Into<String>) -> Self {
        Self::MissingContactInfo(field.into())
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
