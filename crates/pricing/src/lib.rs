//! Pricing & order calculator.
//!
//! Pure functions only: no IO, no side effects. All money math runs on
//! integer cents ([`farmstand_core::Money`]).

pub mod quote;

pub use quote::{CartLineItem, LineQuote, OrderQuote, price_line_item, price_order};
