//! Admin surface: password-gated sessions and the stock adjustment panel.

pub mod panel;
pub mod session;

pub use panel::{AdminPanel, StockView};
pub use session::{SessionStore, SessionToken};
