//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber: JSON lines, `RUST_LOG`-configurable
/// filter, `info` by default.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
