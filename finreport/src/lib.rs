//! finreport serves per-ticker stock reports over a small framed protocol.
//!
//! Overview
//! - [`Reporter`] fans out to four data sources (quote history, analyst
//!   estimates, fundamentals, news) concurrently, each bounded by a timeout.
//! - Quote-source failure is fatal to the request; the other sources degrade
//!   to empty data, so the summary keeps its shape with `"N/A"` values.
//! - [`Server`] accepts TCP connections and runs one task per session; a bad
//!   frame or a dropped connection ends only that session.
//! - [`ReportClient`] runs a sequential session against a server.
//!
//! Wire format: every message is a 4-byte big-endian length prefix followed by
//! a UTF-8 JSON body (`{"cmd":"fetch","ticker":"AAPL"}`, `{"cmd":"exit"}`,
//! `{"status":"ok",...}`, `{"status":"error","message":"..."}`).
//!
//! Examples
//! Serving reports from the fixture-backed sources:
//! ```rust,ignore
//! use std::sync::Arc;
//! use finreport::{Reporter, Server, ServerConfig};
//! use finreport_mock::MockSources;
//!
//! let mock = MockSources::new();
//! let reporter = Reporter::builder()
//!     .quotes(mock.quotes)
//!     .estimates(mock.estimates)
//!     .fundamentals(mock.fundamentals)
//!     .news(mock.news)
//!     .build()?;
//! let server = Server::bind("127.0.0.1:10000", Arc::new(reporter), ServerConfig::default()).await?;
//! server.run().await?;
//! ```
//!
//! Fetching a report and aligning news with prices:
//! ```rust,ignore
//! use finreport::{ClientConfig, ReportClient, annotate};
//!
//! let mut client = ReportClient::connect("127.0.0.1:10000", ClientConfig::default()).await?;
//! let report = client.fetch("AAPL").await?;
//! for point in annotate(&report) {
//!     println!("{} {:.2} ({} news)", point.point.date, point.point.price, point.news.len());
//! }
//! client.exit().await?;
//! ```
#![warn(missing_docs)]

mod client;
pub(crate) mod core;
mod server;

pub use client::ReportClient;
pub use core::{Reporter, ReporterBuilder};
pub use server::{Server, serve_session};

pub use finreport_core::{
    AnnotatedPoint, ClientConfig, Command, FrameError, MetricDef, MetricMap, MetricRegistry,
    MetricRow, MetricSource, NOT_AVAILABLE, NewsItem, NewsSource, QuotePoint, QuoteSeries,
    QuoteSource, Report, ReportConfig, ReportError, Response, ServerConfig, SourceError,
    SourceKind, SummaryTable, Ticker, WireConfig, correlate, unmatched,
};

/// Align a report's news with its trading days for display.
///
/// News dated on non-trading days stays in `report.news` but does not appear
/// in the result; see [`unmatched`] to list those items.
#[must_use]
pub fn annotate(report: &Report) -> Vec<AnnotatedPoint> {
    correlate(&report.quotes, &report.news)
}
