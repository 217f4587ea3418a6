//! Tracing subscriber setup.
//!
//! Console logging honors `RUST_LOG`, defaulting to `info`. File logging
//! writes daily-rotated logs for post-session analysis; the returned guard
//! must be held for the lifetime of the process so buffered lines flush on
//! shutdown.

use std::path::Path;

use time::format_description::well_known::Rfc3339;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize console logging to stderr.
///
/// Safe to call once per process; subsequent calls are ignored.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(LocalTime::new(Rfc3339))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging to a daily-rotated file in `directory`.
///
/// Returns the flush guard; drop it only at process exit.
pub fn init_with_file(directory: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(directory, "ecoeye.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_timer(LocalTime::new(Rfc3339))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    guard
}
