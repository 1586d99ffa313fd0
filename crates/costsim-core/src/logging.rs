//! Logging infrastructure for costsim.
//!
//! Structured logging via the `tracing` ecosystem. The CLI is a
//! one-shot tool, so there is no file sink; logs go to stderr and
//! never interleave with report output on stdout.

use tracing_subscriber::EnvFilter;

/// Initialize the costsim logging system.
///
/// Console output goes to stderr in compact form. The default filter
/// is `costsim=info`; `verbose` raises it to debug. `RUST_LOG`
/// overrides both.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("costsim={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .init();

    tracing::debug!(verbose, "logging initialized");
}

/// Initialize minimal logging for tests.
///
/// Safe to call from multiple tests; only the first call wins.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
