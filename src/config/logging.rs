//! Tracing setup
//!
//! Log output goes to stderr so command output on stdout stays clean. The
//! filter is read from `DREAMSPEND_LOG` (e.g. `DREAMSPEND_LOG=dreamspend=debug`).

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "DREAMSPEND_LOG";

const DEFAULT_FILTER: &str = "dreamspend=warn";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber once; later calls are no-ops
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
