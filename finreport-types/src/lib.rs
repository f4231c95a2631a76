//! finreport-specific data model, wire messages, errors and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod model;
mod source;
mod summary;
mod wire;

pub use config::{ClientConfig, ReportConfig, ServerConfig, WireConfig};
pub use error::{FrameError, ReportError, SourceError};
pub use model::{AnnotatedPoint, NewsItem, QuotePoint, QuoteSeries, Ticker};
pub use source::SourceKind;
pub use summary::{MetricMap, MetricRow, NOT_AVAILABLE, SummaryTable};
pub use wire::{Command, Report, Response};
