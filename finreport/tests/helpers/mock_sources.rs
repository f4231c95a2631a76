#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use finreport::{
    MetricMap, MetricSource, NewsItem, NewsSource, QuoteSeries, QuoteSource, SourceError, Ticker,
};
use tokio::time::{Duration, sleep};

/// In-memory source used by integration tests.
/// Tailor behavior per test via the closures below; unset closures answer `NotFound`.
pub struct MockSource {
    pub name: &'static str,
    pub delay_ms: u64,
    pub calls: Arc<AtomicUsize>,

    pub history_fn: Option<Arc<dyn Fn(&Ticker) -> Result<QuoteSeries, SourceError> + Send + Sync>>,
    pub metrics_fn: Option<Arc<dyn Fn(&Ticker) -> Result<MetricMap, SourceError> + Send + Sync>>,
    pub news_fn: Option<Arc<dyn Fn(&Ticker) -> Result<Vec<NewsItem>, SourceError> + Send + Sync>>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            name: "default_mock",
            delay_ms: 0,
            calls: Arc::new(AtomicUsize::new(0)),
            history_fn: None,
            metrics_fn: None,
            news_fn: None,
        }
    }
}

impl MockSource {
    pub fn history(
        f: impl Fn(&Ticker) -> Result<QuoteSeries, SourceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: "mock_quotes",
            history_fn: Some(Arc::new(f)),
            ..Self::default()
        }
    }

    pub fn metrics(
        name: &'static str,
        f: impl Fn(&Ticker) -> Result<MetricMap, SourceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            metrics_fn: Some(Arc::new(f)),
            ..Self::default()
        }
    }

    pub fn news(
        f: impl Fn(&Ticker) -> Result<Vec<NewsItem>, SourceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: "mock_news",
            news_fn: Some(Arc::new(f)),
            ..Self::default()
        }
    }

    pub const fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Shared counter of calls made to this source.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl QuoteSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_history(&self, ticker: &Ticker) -> Result<QuoteSeries, SourceError> {
        self.enter().await;
        match &self.history_fn {
            Some(f) => (f)(ticker),
            None => Err(SourceError::not_found(format!("history for {ticker}"))),
        }
    }
}

#[async_trait]
impl MetricSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_metrics(&self, ticker: &Ticker) -> Result<MetricMap, SourceError> {
        self.enter().await;
        match &self.metrics_fn {
            Some(f) => (f)(ticker),
            None => Err(SourceError::not_found(format!("metrics for {ticker}"))),
        }
    }
}

#[async_trait]
impl NewsSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_news(&self, ticker: &Ticker) -> Result<Vec<NewsItem>, SourceError> {
        self.enter().await;
        match &self.news_fn {
            Some(f) => (f)(ticker),
            None => Err(SourceError::not_found(format!("news for {ticker}"))),
        }
    }
}
