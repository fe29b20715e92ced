use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TEST_LOGGING: OnceLock<()> = OnceLock::new();

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_TEST_FILTER: &str = "warn";

/// Installs a console subscriber whose output is captured by the test harness.
///
/// Safe to call from every test; only the first call installs anything. The
/// filter comes from `RUST_LOG` when set, e.g. `RUST_LOG=reduction=debug`.
pub fn init_test_logging() {
    TEST_LOGGING.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_TEST_FILTER))
            .unwrap_or_else(|e| panic!("Invalid log filter: {}", e));

        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_test_writer();

        // Another harness may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init();
    });
}
