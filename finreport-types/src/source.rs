use core::fmt;
use serde::{Deserialize, Serialize};

/// Labels for the external data sources consulted while building a report.
///
/// Used in errors and telemetry so every failure names the source it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Daily closing-price history.
    Quotes,
    /// Remote analyst estimates and price-target consensus.
    Estimates,
    /// Locally scraped company fundamentals.
    Fundamentals,
    /// Scraped news items about the company.
    News,
}

impl SourceKind {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quotes => "quotes",
            Self::Estimates => "estimates",
            Self::Fundamentals => "fundamentals",
            Self::News => "news",
        }
    }

    /// Whether a failure of this source fails the whole report.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Quotes)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
