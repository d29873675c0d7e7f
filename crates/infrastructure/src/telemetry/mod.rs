//! Telemetry setup
//!
//! Structured logging to stderr with `RUST_LOG`-style filtering.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber
///
/// `default_filter` applies when `RUST_LOG` is unset, e.g. `"info"` or
/// `"farelane=debug,info"`. Calling twice is an error from the subscriber
/// registry, so this belongs in `main`.
pub fn init_telemetry(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}
