use std::sync::Arc;
use std::time::Duration;

use finreport_core::{
    MetricMap, MetricRegistry, MetricSource, NewsItem, NewsSource, QuoteSeries, QuoteSource,
    Report, ReportConfig, ReportError, Response, SourceError, SourceKind, Ticker, merge,
};

/// Builds stock reports by fanning out to the registered data sources.
///
/// A `Reporter` holds only shared, read-only state and is meant to be wrapped
/// in an `Arc` and used from many sessions at once.
pub struct Reporter {
    quotes: Arc<dyn QuoteSource>,
    estimates: Option<Arc<dyn MetricSource>>,
    fundamentals: Option<Arc<dyn MetricSource>>,
    news: Option<Arc<dyn NewsSource>>,
    registry: MetricRegistry,
    cfg: ReportConfig,
}

/// Builder for constructing a [`Reporter`].
pub struct ReporterBuilder {
    quotes: Option<Arc<dyn QuoteSource>>,
    estimates: Option<Arc<dyn MetricSource>>,
    fundamentals: Option<Arc<dyn MetricSource>>,
    news: Option<Arc<dyn NewsSource>>,
    registry: MetricRegistry,
    cfg: ReportConfig,
}

impl Default for ReporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReporterBuilder {
    /// Create a builder with the standard metric registry and a 10s source timeout.
    ///
    /// A quote source is mandatory; the other three are optional and behave as
    /// an always-empty source when left unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            quotes: None,
            estimates: None,
            fundamentals: None,
            news: None,
            registry: MetricRegistry::standard(),
            cfg: ReportConfig::default(),
        }
    }

    /// Register the closing-price history source.
    #[must_use]
    pub fn quotes(mut self, source: Arc<dyn QuoteSource>) -> Self {
        self.quotes = Some(source);
        self
    }

    /// Register the analyst-estimates source.
    ///
    /// On key collisions, values from the fundamentals source take precedence.
    #[must_use]
    pub fn estimates(mut self, source: Arc<dyn MetricSource>) -> Self {
        self.estimates = Some(source);
        self
    }

    /// Register the fundamentals source.
    #[must_use]
    pub fn fundamentals(mut self, source: Arc<dyn MetricSource>) -> Self {
        self.fundamentals = Some(source);
        self
    }

    /// Register the news source.
    #[must_use]
    pub fn news(mut self, source: Arc<dyn NewsSource>) -> Self {
        self.news = Some(source);
        self
    }

    /// Replace the standard metric registry.
    #[must_use]
    pub fn registry(mut self, registry: MetricRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the per-source call timeout.
    ///
    /// A source that does not answer in time is treated exactly like a source
    /// that failed: fatal for quotes, degraded to empty data otherwise.
    #[must_use]
    pub const fn source_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.source_timeout = timeout;
        self
    }

    /// Replace the whole report configuration.
    #[must_use]
    pub const fn config(mut self, cfg: ReportConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Reporter`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if no quote source was registered or the source
    /// timeout is zero.
    pub fn build(self) -> Result<Reporter, ReportError> {
        let Some(quotes) = self.quotes else {
            return Err(ReportError::InvalidConfig(
                "no quote source registered; add one via quotes(...)".to_string(),
            ));
        };
        if self.cfg.source_timeout.is_zero() {
            return Err(ReportError::InvalidConfig(
                "source_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Reporter {
            quotes,
            estimates: self.estimates,
            fundamentals: self.fundamentals,
            news: self.news,
            registry: self.registry,
            cfg: self.cfg,
        })
    }
}

impl Reporter {
    /// Start building a new `Reporter`.
    #[must_use]
    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::new()
    }

    /// The registry every summary is shaped by.
    #[must_use]
    pub const fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReportConfig {
        &self.cfg
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "finreport::core::call_with_timeout",
            skip(fut, source_name, kind, timeout),
            fields(
                source = source_name,
                kind = %kind,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub(crate) async fn call_with_timeout<T, Fut>(
        source_name: &'static str,
        kind: SourceKind,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, SourceError>
    where
        Fut: core::future::Future<Output = Result<T, SourceError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(SourceError::timeout(kind)))
    }

    async fn fetch_quotes(&self, ticker: &Ticker) -> Result<QuoteSeries, SourceError> {
        let series = Self::call_with_timeout(
            self.quotes.name(),
            SourceKind::Quotes,
            self.cfg.source_timeout,
            self.quotes.fetch_history(ticker),
        )
        .await?;
        if series.is_empty() {
            return Err(SourceError::failed(
                SourceKind::Quotes,
                format!("no price history for {ticker}"),
            ));
        }
        Ok(series)
    }

    async fn fetch_metrics(
        &self,
        source: Option<&Arc<dyn MetricSource>>,
        kind: SourceKind,
        ticker: &Ticker,
    ) -> Result<MetricMap, SourceError> {
        let Some(source) = source else {
            return Ok(MetricMap::new());
        };
        Self::call_with_timeout(
            source.name(),
            kind,
            self.cfg.source_timeout,
            source.fetch_metrics(ticker),
        )
        .await
    }

    async fn fetch_news(&self, ticker: &Ticker) -> Result<Vec<NewsItem>, SourceError> {
        let Some(source) = self.news.as_ref() else {
            return Ok(Vec::new());
        };
        Self::call_with_timeout(
            source.name(),
            SourceKind::News,
            self.cfg.source_timeout,
            source.fetch_news(ticker),
        )
        .await
    }

    /// Build the report for an already-validated ticker.
    ///
    /// The four source calls run concurrently; latency is bounded by the
    /// slowest source (or the source timeout).
    ///
    /// # Errors
    /// Returns `ReportError::Source` when the quote source fails, times out or
    /// returns an empty history. Estimate, fundamentals and news failures are
    /// absorbed: the affected rows read `"N/A"` and the news list is empty.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "finreport::core::report",
            skip(self, ticker),
            fields(ticker = %ticker),
        )
    )]
    pub async fn report(&self, ticker: &Ticker) -> Result<Report, ReportError> {
        let (quotes, estimates, fundamentals, news) = tokio::join!(
            self.fetch_quotes(ticker),
            self.fetch_metrics(self.estimates.as_ref(), SourceKind::Estimates, ticker),
            self.fetch_metrics(self.fundamentals.as_ref(), SourceKind::Fundamentals, ticker),
            self.fetch_news(ticker),
        );

        let quotes = settle(SourceKind::Quotes, ticker, quotes)?;
        let estimates = settle(SourceKind::Estimates, ticker, estimates)?;
        let fundamentals = settle(SourceKind::Fundamentals, ticker, fundamentals)?;
        let news = settle(SourceKind::News, ticker, news)?;

        // fundamentals come last so they override estimates on shared keys
        let summary = merge(&[estimates, fundamentals], &self.registry);
        Ok(Report {
            quotes,
            summary,
            news,
        })
    }

    /// Answer a `Fetch` command: validate the raw ticker, then build the report.
    ///
    /// Never fails; every problem is reported as `Response::Error`. An invalid
    /// ticker is rejected before any source is contacted.
    pub async fn build_report(&self, raw_ticker: &str) -> Response {
        let ticker = match Ticker::parse(raw_ticker) {
            Ok(t) => t,
            Err(e) => return Response::error(e.to_string()),
        };
        match self.report(&ticker).await {
            Ok(report) => Response::Ok(report),
            Err(e) => Response::error(e.to_string()),
        }
    }
}

/// Apply the partial-failure policy to one source result.
///
/// A failure of a fatal source is returned as is; any other failure degrades
/// to the empty value.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn settle<T: Default>(
    kind: SourceKind,
    ticker: &Ticker,
    res: Result<T, SourceError>,
) -> Result<T, SourceError> {
    match res {
        Ok(v) => Ok(v),
        Err(e) if kind.is_fatal() => {
            #[cfg(feature = "tracing")]
            tracing::warn!(ticker = %ticker, kind = %kind, error = %e, "source failed; no report");
            Err(e)
        }
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(ticker = %ticker, kind = %kind, error = %e, "source failed; degrading to empty");
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn call_with_timeout_maps_elapsed_to_source_timeout() {
        let res: Result<(), SourceError> = Reporter::call_with_timeout(
            "slow",
            SourceKind::Estimates,
            Duration::from_millis(5),
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            },
        )
        .await;
        assert_eq!(res, Err(SourceError::timeout(SourceKind::Estimates)));
    }

    #[test]
    fn settle_degrades_only_non_fatal_sources() {
        let t = Ticker::parse("AAPL").unwrap();
        let m: MetricMap = settle(
            SourceKind::Fundamentals,
            &t,
            Err(SourceError::failed(SourceKind::Fundamentals, "layout changed")),
        )
        .unwrap();
        assert!(m.is_empty());

        let news: Vec<NewsItem> =
            settle(SourceKind::News, &t, Err(SourceError::timeout(SourceKind::News))).unwrap();
        assert!(news.is_empty());

        let quotes: Result<QuoteSeries, _> = settle(
            SourceKind::Quotes,
            &t,
            Err(SourceError::timeout(SourceKind::Quotes)),
        );
        assert_eq!(quotes, Err(SourceError::timeout(SourceKind::Quotes)));
    }

    #[test]
    fn builder_requires_quote_source() {
        let err = Reporter::builder().build().err().unwrap();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }
}
