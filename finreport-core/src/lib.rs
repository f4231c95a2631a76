//! finreport-core
//!
//! Contracts and leaf algorithms shared across the finreport workspace.
//!
//! - `source`: the data source role traits (`QuoteSource`, `MetricSource`, `NewsSource`).
//! - `codec`: length-prefixed JSON framing for commands and responses.
//! - `correlate`: exact-date alignment of news items onto trading days.
//! - `merge`: precedence merge of metric dictionaries into a fixed-shape summary.
//!
//! Async runtime (Tokio)
//! ---------------------
//! The stream half of the codec is written against `tokio::io::{AsyncRead, AsyncWrite}`,
//! so framed I/O must run under a Tokio 1.x runtime. The byte-level `encode`/`decode`
//! functions and the leaf algorithms are runtime-agnostic.
#![warn(missing_docs)]

/// Length-prefixed JSON framing.
pub mod codec;
/// News-to-price alignment.
pub mod correlate;
/// Metric registry and precedence merge.
pub mod merge;
/// Data source role traits.
pub mod source;

pub use codec::{HEADER_LEN, decode, encode, read_frame, write_frame};
pub use correlate::{correlate, unmatched};
pub use merge::{MetricDef, MetricRegistry, merge, merge_maps};
pub use source::{MetricSource, NewsSource, QuoteSource};

pub use finreport_types::*;
