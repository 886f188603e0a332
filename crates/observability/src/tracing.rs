//! Tracing/logging initialization.
//!
//! Logs go to stderr: stdout belongs to the rendered storefront views.

use tracing_subscriber::EnvFilter;

/// Install the storefront's JSON subscriber. `default_filter` applies when
/// `RUST_LOG` is unset or unparsable; later calls leave the first one in place.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // One JSON object per line, timestamped.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
