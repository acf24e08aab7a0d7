//! Tracing setup for embedders and examples.

use tracing_subscriber::EnvFilter;

use crate::config;

/// Install the global fmt subscriber, honoring RUST_LOG when present.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .ok();
}
