//! Structured logging for conformance runs.
//!
//! Every verification event carries the structured fields `test`, `code`
//! and, where relevant, `key` (the active configuration key) and `path`
//! (the mismatched property), so a JSON log can be filtered with `jq`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use gigs_error::Result;

use crate::outcome::Verdict;

/// Output format of [`init_logging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, ANSI-colored, compact.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Install a global subscriber.
///
/// Events are filtered at `INFO`, or `TRACE` with `verbose`, unless
/// `RUST_LOG` says otherwise. Returns `false` if a subscriber was already
/// installed.
pub fn init_logging(format: LogFormat, verbose: bool) -> bool {
    let level = if verbose { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init(),
    };
    installed.is_ok()
}

/// Initialize logging for tests: terminal only, captured by the test runner.
///
/// Uses `try_init` so it is safe to call from every `#[test]` function.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gigs_harness=debug"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(false)
                .with_test_writer()
                .compact(),
        )
        .try_init();
}

/// Run one verification and log its verdict.
///
/// Records `test`, `code`, `elapsed_us` and the outcome as structured
/// fields.
pub fn log_verification(
    test: &str,
    code: i32,
    f: impl FnOnce() -> Result<Verdict>,
) -> Result<Verdict> {
    let start = std::time::Instant::now();
    let result = f();
    let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

    match &result {
        Ok(Verdict::Passed) => {
            tracing::info!(test, code, elapsed_us, outcome = "passed", "verification complete");
        }
        Ok(Verdict::Skipped(reason)) => {
            tracing::info!(test, code, elapsed_us, outcome = "skipped", %reason, "verification skipped");
        }
        Err(e) => {
            tracing::warn!(
                test,
                code,
                elapsed_us,
                outcome = "failed",
                kind = ?e.kind(),
                path = e.path().unwrap_or_default(),
                error = %e,
                "verification failed"
            );
        }
    }

    result
}
