//! Structured logging setup.
//!
//! Library code only emits `tracing` events; the binary calls
//! [`init_logging`] once to install a subscriber.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "bibliotool=info";

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `bibliotool=info` (or `bibliotool=debug` when `verbose`).
/// Logs go to stderr so stdout stays clean for JSON output. Subsequent calls
/// are silently ignored by `tracing_subscriber`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "bibliotool=debug"
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
