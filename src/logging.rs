//! Tracing setup for the statement binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is not set
const DEFAULT_DIRECTIVE: &str = "statement=info";

/// Initializes the global tracing subscriber
///
/// Honours `RUST_LOG`; otherwise logs the engine at `info`. Output goes to
/// stderr so it never mixes with exported reports on stdout. Safe to call
/// more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
