//! Log subscriber setup for the binary. Library code only emits `tracing`
//! events; nothing is printed unless a subscriber is installed here.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set (e.g. `RUST_LOG=agenda=trace`); otherwise the
/// level is `debug` with `verbose` and `warn` without.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Verbose subscriber routed through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
