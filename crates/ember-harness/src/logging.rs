#![forbid(unsafe_code)]

//! Tracing subscriber setup for harness runs.
//!
//! Filter with `EMBER_LOG`, e.g. `EMBER_LOG=ember_core=trace`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const ENV_FILTER: &str = "EMBER_LOG";

/// Install a test-friendly fmt subscriber.
///
/// Returns `false` if a global subscriber was already set; safe to call from
/// every test.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(ENV_FILTER).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .is_ok()
}
