use core::fmt;
use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ReportError;

/// Canonical stock symbol: trimmed, uppercase, non-empty.
///
/// Every data source is keyed by a `Ticker`; raw user input must go through
/// [`Ticker::parse`] before any source is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticker(String);

impl Ticker {
    /// Longest accepted symbol, in characters.
    pub const MAX_LEN: usize = 16;

    /// Canonicalize raw input into a ticker.
    ///
    /// Accepts ASCII alphanumerics plus `.`, `-`, `^` and `=`, which covers share
    /// classes (`BRK.B`), indices (`^GSPC`), currencies (`EURUSD=X`) and crypto
    /// pairs (`BTC-USD`).
    ///
    /// # Errors
    /// Returns `ReportError::InvalidTicker` for empty, overlong or otherwise
    /// malformed input.
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReportError::InvalidTicker("ticker is empty".into()));
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(ReportError::InvalidTicker(format!(
                "ticker longer than {} characters: {trimmed}",
                Self::MAX_LEN
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
        {
            return Err(ReportError::InvalidTicker(format!(
                "unexpected character {bad:?} in {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the canonical symbol.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One trading day: calendar date and closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotePoint {
    /// Trading date (serialized as ISO-8601 `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Closing price.
    pub price: f64,
}

impl QuotePoint {
    /// Construct a point from a date and closing price.
    #[must_use]
    pub const fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Closing-price history with strictly increasing, unique dates.
///
/// The ordering invariant is checked on construction and on deserialization,
/// so a decoded series can be trusted without re-validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<QuotePoint>", into = "Vec<QuotePoint>")]
pub struct QuoteSeries(Vec<QuotePoint>);

impl QuoteSeries {
    /// Build a series from points already in chronological order.
    ///
    /// # Errors
    /// Returns `ReportError::Data` if dates are not strictly increasing or a
    /// price is not finite.
    pub fn new(points: Vec<QuotePoint>) -> Result<Self, ReportError> {
        for w in points.windows(2) {
            if w[1].date <= w[0].date {
                return Err(ReportError::Data(format!(
                    "quote dates must be strictly increasing: {} followed by {}",
                    w[0].date, w[1].date
                )));
            }
        }
        if let Some(p) = points.iter().find(|p| !p.price.is_finite()) {
            return Err(ReportError::Data(format!(
                "non-finite closing price on {}",
                p.date
            )));
        }
        Ok(Self(points))
    }

    /// Returns the points in chronological order.
    #[must_use]
    pub fn points(&self) -> &[QuotePoint] {
        &self.0
    }

    /// Number of trading days in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Earliest point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&QuotePoint> {
        self.0.first()
    }

    /// Latest point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&QuotePoint> {
        self.0.last()
    }

    /// Percentage change from the first to the last close.
    ///
    /// `None` for an empty series or a zero first close.
    #[must_use]
    pub fn change_pct(&self) -> Option<f64> {
        let first = self.first()?.price;
        let last = self.last()?.price;
        if first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }

    /// Iterate over the points in chronological order.
    pub fn iter(&self) -> core::slice::Iter<'_, QuotePoint> {
        self.0.iter()
    }
}

impl TryFrom<Vec<QuotePoint>> for QuoteSeries {
    type Error = ReportError;

    fn try_from(points: Vec<QuotePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<QuoteSeries> for Vec<QuotePoint> {
    fn from(s: QuoteSeries) -> Self {
        s.0
    }
}

impl<'a> IntoIterator for &'a QuoteSeries {
    type Item = &'a QuotePoint;
    type IntoIter = core::slice::Iter<'a, QuotePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A news item about the company behind a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Publication date (serialized as ISO-8601 `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Headline.
    pub title: String,
    /// Article URL.
    pub link: String,
}

impl NewsItem {
    /// Construct a news item.
    pub fn new(date: NaiveDate, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            link: link.into(),
        }
    }
}

/// A trading day together with the news published on that exact date.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedPoint {
    /// The trading day.
    pub point: QuotePoint,
    /// News items dated on `point.date`, in input order.
    pub news: Vec<NewsItem>,
}
