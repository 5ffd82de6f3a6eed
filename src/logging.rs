//! Logging initialization
//!
//! Logs go to stderr so stdout stays machine-readable. The level defaults
//! to WARN and can be raised with `RUST_LOG` (e.g. `RUST_LOG=pili_demo=debug`).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
