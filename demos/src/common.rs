use std::sync::Arc;

use finreport::{ReportError, Reporter};
use finreport_mock::MockSources;
use tracing_subscriber::fmt::format::FmtSpan;

/// Address used when `FINREPORT_ADDR` is not set.
pub const DEFAULT_ADDR: &str = "127.0.0.1:10000";

/// Server address from `FINREPORT_ADDR`, falling back to [`DEFAULT_ADDR`].
#[must_use]
pub fn server_addr() -> String {
    std::env::var("FINREPORT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string())
}

/// Initialize a human-friendly subscriber filtered by `RUST_LOG`.
///
/// Suggested: `RUST_LOG=info,finreport=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Reporter backed by the fixture sources (`AAPL`, `MSFT`, `TSLA`; `FAIL`, `TIMEOUT`).
///
/// # Errors
/// Propagates builder validation errors.
pub fn mock_reporter() -> Result<Arc<Reporter>, ReportError> {
    let mock = MockSources::new();
    let reporter = Reporter::builder()
        .quotes(mock.quotes)
        .estimates(mock.estimates)
        .fundamentals(mock.fundamentals)
        .news(mock.news)
        .build()?;
    Ok(Arc::new(reporter))
}
