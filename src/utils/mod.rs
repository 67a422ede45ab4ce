//! Shared utilities.

use tracing_subscriber::EnvFilter;

/// Initializes a global tracing subscriber for binaries and examples.
///
/// Respects `RUST_LOG`, defaulting to `info`. Repeated calls are
/// harmless; only the first installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
