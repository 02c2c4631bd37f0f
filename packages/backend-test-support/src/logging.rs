//! Unified test logging initialization

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize logging for tests. Idempotent and race-safe.
///
/// The filter comes from `TEST_LOG`, then `RUST_LOG`, then defaults to
/// `warn`. Output goes through the test writer so cargo captures it, and
/// `TEST_LOG_JSON=1` switches to the JSON formatter used in production.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");
        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        // try_init: another subscriber may already be installed
        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
