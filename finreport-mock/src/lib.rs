//! Deterministic, fixture-backed data sources for tests and demos.
//!
//! Fixtures exist for `AAPL`, `MSFT` and `TSLA`. Two magic symbols drive
//! failure paths: `FAIL` makes every source return an error and `TIMEOUT`
//! delays every source long enough to trip a short source timeout.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use finreport_core::{
    MetricMap, MetricSource, NewsItem, NewsSource, QuoteSeries, QuoteSource, SourceError,
    SourceKind, Ticker,
};

mod fixtures;

/// Delay applied to the `TIMEOUT` symbol.
pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

async fn maybe_fail_or_timeout(ticker: &Ticker, kind: SourceKind) -> Result<(), SourceError> {
    match ticker.as_str() {
        "FAIL" => Err(SourceError::failed(kind, format!("forced failure: {kind}"))),
        "TIMEOUT" => {
            tokio::time::sleep(TIMEOUT_DELAY).await;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn not_found(kind: SourceKind, ticker: &Ticker) -> SourceError {
    SourceError::not_found(format!("{kind} for {ticker}"))
}

/// Closing-price history from static fixtures.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockQuotes;

#[async_trait]
impl QuoteSource for MockQuotes {
    fn name(&self) -> &'static str {
        "mock-quotes"
    }

    async fn fetch_history(&self, ticker: &Ticker) -> Result<QuoteSeries, SourceError> {
        maybe_fail_or_timeout(ticker, SourceKind::Quotes).await?;
        fixtures::quotes::by_symbol(ticker.as_str())
            .ok_or_else(|| not_found(SourceKind::Quotes, ticker))
    }
}

/// Metric dictionaries from static fixtures, playing either the estimates or
/// the fundamentals role.
#[derive(Debug, Clone, Copy)]
pub struct MockMetrics {
    kind: SourceKind,
}

impl MockMetrics {
    /// Analyst-estimate fixtures (`consensus`, `targetHigh`, ...).
    #[must_use]
    pub const fn estimates() -> Self {
        Self {
            kind: SourceKind::Estimates,
        }
    }

    /// Fundamentals-table fixtures (`Market Cap`, `P/E`, ...).
    #[must_use]
    pub const fn fundamentals() -> Self {
        Self {
            kind: SourceKind::Fundamentals,
        }
    }
}

#[async_trait]
impl MetricSource for MockMetrics {
    fn name(&self) -> &'static str {
        match self.kind {
            SourceKind::Estimates => "mock-estimates",
            _ => "mock-fundamentals",
        }
    }

    async fn fetch_metrics(&self, ticker: &Ticker) -> Result<MetricMap, SourceError> {
        maybe_fail_or_timeout(ticker, self.kind).await?;
        let found = match self.kind {
            SourceKind::Estimates => fixtures::metrics::estimates_by_symbol(ticker.as_str()),
            _ => fixtures::metrics::fundamentals_by_symbol(ticker.as_str()),
        };
        found.ok_or_else(|| not_found(self.kind, ticker))
    }
}

/// News items from static fixtures.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockNews;

#[async_trait]
impl NewsSource for MockNews {
    fn name(&self) -> &'static str {
        "mock-news"
    }

    async fn fetch_news(&self, ticker: &Ticker) -> Result<Vec<NewsItem>, SourceError> {
        maybe_fail_or_timeout(ticker, SourceKind::News).await?;
        fixtures::news::by_symbol(ticker.as_str()).ok_or_else(|| not_found(SourceKind::News, ticker))
    }
}

/// One shared handle per source role, ready to hand to a reporter builder.
#[derive(Clone)]
pub struct MockSources {
    /// Closing-price history.
    pub quotes: Arc<dyn QuoteSource>,
    /// Analyst estimates.
    pub estimates: Arc<dyn MetricSource>,
    /// Company fundamentals.
    pub fundamentals: Arc<dyn MetricSource>,
    /// News items.
    pub news: Arc<dyn NewsSource>,
}

impl MockSources {
    /// Bundle the fixture-backed sources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quotes: Arc::new(MockQuotes),
            estimates: Arc::new(MockMetrics::estimates()),
            fundamentals: Arc::new(MockMetrics::fundamentals()),
            news: Arc::new(MockNews),
        }
    }
}

impl Default for MockSources {
    fn default() -> Self {
        Self::new()
    }
}
