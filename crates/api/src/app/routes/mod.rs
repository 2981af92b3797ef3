//! HTTP routes and handlers, one file per surface area.

pub mod admin;
pub mod catalog;
pub mod orders;
pub mod system;
