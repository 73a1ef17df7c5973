//! Tracing setup for embedding applications
//!
//! The pipeline logs through the `tracing` macros: apply failures at
//! error level, drain cycles at trace level. Embedders that already
//! install their own subscriber need nothing from this module; the
//! helpers here are for hosts that want a working setup out of the
//! box.
//!
//! # Usage
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=ripple=trace` - this crate only, with drain-cycle detail

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize console logging.
///
/// Output respects RUST_LOG for filtering and defaults to `warn`.
/// Panics if a global subscriber is already installed.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_filter(console_filter),
        )
        .init();
}

/// Initialize console logging plus a daily-rotated log file under
/// `logs_dir`.
///
/// The console layer respects RUST_LOG; the file layer is always debug
/// level for troubleshooting. The directory must already exist.
pub fn init_with_log_dir(logs_dir: &Path) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_appender = tracing_appender::rolling::daily(logs_dir, "ripple.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only one test may install the global subscriber per test
    // process, so file and console setup share a test.
    #[test]
    fn test_init_with_log_dir_writes_a_log_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        init_with_log_dir(dir.path());

        ::tracing::debug!("log file smoke test");

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .expect("Failed to read log dir")
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(entries.len(), 1, "Expected exactly one rotated log file");
        let name = entries[0].file_name();
        assert!(name.to_string_lossy().starts_with("ripple.log"));
    }
}
