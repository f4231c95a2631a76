// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code, unused_imports)]

pub mod mock_sources;

pub use mock_sources::MockSource;

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::NaiveDate;
use finreport::{
    MetricMap, NewsItem, QuotePoint, QuoteSeries, Reporter, Server, ServerConfig,
};
use finreport_mock::MockSources;
use tokio::sync::oneshot;

/// Build a `NaiveDate` for readability in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

/// Build a validated series from `(date, close)` pairs.
pub fn series(points: &[(NaiveDate, f64)]) -> QuoteSeries {
    QuoteSeries::new(
        points
            .iter()
            .map(|&(date, price)| QuotePoint::new(date, price))
            .collect(),
    )
    .expect("ordered test series")
}

/// The two-day series used by the correlation scenario.
pub fn two_day_series() -> QuoteSeries {
    series(&[(d(2024, 1, 2), 100.0), (d(2024, 1, 3), 102.0)])
}

pub fn news_item(date: NaiveDate, title: &str) -> NewsItem {
    NewsItem::new(date, title, format!("https://news.example/{title}"))
}

pub fn metrics(pairs: &[(&str, &str)]) -> MetricMap {
    pairs
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Reporter wired to the fixture-backed mock sources.
pub fn mock_reporter() -> Reporter {
    let mock = MockSources::new();
    Reporter::builder()
        .quotes(mock.quotes)
        .estimates(mock.estimates)
        .fundamentals(mock.fundamentals)
        .news(mock.news)
        .build()
        .expect("valid reporter")
}

/// A running server on an ephemeral port; dropping `shutdown` stops accepting.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: oneshot::Sender<()>,
    pub handle: tokio::task::JoinHandle<()>,
}

pub async fn spawn_server(reporter: Reporter, cfg: ServerConfig) -> TestServer {
    let server = Server::bind("127.0.0.1:0", Arc::new(reporter), cfg)
        .await
        .expect("bind ephemeral port");
    let addr = server.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        server
            .run_until(async move {
                let _ = rx.await;
            })
            .await
            .expect("server loop");
    });
    TestServer {
        addr,
        shutdown: tx,
        handle,
    }
}
