use async_trait::async_trait;

use finreport_types::{MetricMap, NewsItem, QuoteSeries, SourceError, Ticker};

/// Focused role trait for sources that provide closing-price history.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// A stable identifier used in logs and errors (e.g. "twelvedata").
    fn name(&self) -> &'static str;

    /// Fetch the daily closing-price history for `ticker`.
    async fn fetch_history(&self, ticker: &Ticker) -> Result<QuoteSeries, SourceError>;
}

/// Focused role trait for sources that provide a flat metric dictionary.
///
/// Both analyst-estimate APIs and scraped fundamentals tables implement this
/// trait; the reporter decides their merge precedence.
///
/// Implementations that need an expensive per-call resource (a browser
/// session, a scraping client) should acquire it inside `fetch_metrics` and
/// let it drop before returning, so it is released on every exit path.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// A stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetch metrics for `ticker`, keyed by the source's own field names.
    async fn fetch_metrics(&self, ticker: &Ticker) -> Result<MetricMap, SourceError>;
}

/// Focused role trait for sources that provide news items.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// A stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetch news items about the company behind `ticker`, newest first.
    async fn fetch_news(&self, ticker: &Ticker) -> Result<Vec<NewsItem>, SourceError>;
}
