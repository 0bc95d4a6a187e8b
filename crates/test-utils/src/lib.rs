//! Shared helpers for the `wfmakespan` integration tests.

pub mod builders;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};
use wfmakespan::logging::LOG_ENV_VAR;

static TRACING: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// Output goes through the libtest capture, so it only shows up for failing
/// tests. Filters come from `WFMAKESPAN_LOG`, e.g.
/// `WFMAKESPAN_LOG=wfmakespan::estimate=trace`; the default is `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
