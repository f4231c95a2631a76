//! Messages exchanged between client and server.
//!
//! Bodies are JSON objects:
//! - commands are tagged by `"cmd"`: `{"cmd":"fetch","ticker":"AAPL"}`, `{"cmd":"exit"}`
//! - responses are tagged by `"status"`: `{"status":"ok","quotes":[..],"summary":[..],"news":[..]}`
//!   or `{"status":"error","message":".."}`

use serde::{Deserialize, Serialize};

use crate::{NewsItem, QuoteSeries, SummaryTable};

/// Request sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Command {
    /// Build a report for a ticker.
    ///
    /// The ticker travels as typed by the user; the server canonicalizes it and
    /// answers malformed input with an error response.
    Fetch {
        /// Raw ticker text.
        ticker: String,
    },
    /// End the session.
    Exit,
}

impl Command {
    /// Helper: build a `Fetch` command.
    pub fn fetch(ticker: impl Into<String>) -> Self {
        Self::Fetch {
            ticker: ticker.into(),
        }
    }
}

/// Successful report payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Closing-price history, strictly increasing dates.
    pub quotes: QuoteSeries,
    /// Fixed-shape metric summary in registry order.
    pub summary: SummaryTable,
    /// Every news item the news source returned, in source order.
    pub news: Vec<NewsItem>,
}

/// Reply sent by the server for each `Fetch` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    /// The report was built.
    Ok(Report),
    /// The request failed as a whole.
    Error {
        /// Human-readable failure reason.
        message: String,
    },
}

impl Response {
    /// Helper: build an `Error` response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Returns `true` for a successful response.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl From<Report> for Response {
    fn from(r: Report) -> Self {
        Self::Ok(r)
    }
}
