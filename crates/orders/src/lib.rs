//! Order intake.
//!
//! Validates and prices incoming orders against a live inventory read.
//! Confirmations are returned to the caller, never persisted, and stock is
//! not decremented here; fulfillment stays a manual admin adjustment.

pub mod intake;

pub use intake::{CustomerContact, OrderConfirmation, OrderIntake, OrderLineRequest};
