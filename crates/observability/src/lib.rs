//! Tracing/logging setup shared by every binary in the workspace.

pub mod tracing;

/// Initialize process-wide observability.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    tracing::init();
}
