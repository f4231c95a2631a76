use std::collections::HashSet;

use finreport_types::{MetricMap, MetricRow, NOT_AVAILABLE, ReportError, SummaryTable};

/// One report field: the source key it is read from, plus its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDef {
    /// Key looked up in the merged source dictionaries.
    pub key: String,
    /// Human-readable row label.
    pub label: String,
    /// Short economic interpretation shown next to the value.
    pub description: String,
}

impl MetricDef {
    /// Construct a metric definition.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

// (source key, label, description)
const STANDARD: &[(&str, &str, &str)] = &[
    ("Price", "Current Price", "Current market value of the stock."),
    ("Market Cap", "Market Capitalization", "Total size of the company in the market."),
    ("Perf Year", "Annual Performance", "Percentage change in stock price over the last year."),
    ("P/E", "P/E Ratio", "Price/Earnings. Indicates how expensive the stock is."),
    (
        "Forward P/E",
        "Forward P/E",
        "Expected Price/Earnings ratio (lower values indicate potential improvement).",
    ),
    ("Target Price", "Target Price", "Price that analysts expect within 12 months."),
    ("consensus", "Consensus", "Average analyst opinion (Buy/Hold/Sell)."),
    ("targetHigh", "Analysts Ceiling", "The most optimistic price target recorded."),
    ("EPS next Y", "EPS Growth", "Expected earnings growth for the next year."),
    ("ROE", "ROE (%)", "Return on Equity. Measures efficiency of capital use."),
    ("Debt/Eq", "Debt/Capital", "Leverage level. Low values indicate financial strength."),
    ("Profit Margin", "Profit Margin", "Percentage of revenue converted to profit."),
    ("RSI (14)", "RSI Index", "Indicates if the stock is overbought (>70) or oversold (<30)."),
    ("revenueAvg", "Revenue 2030 (Est)", "Long-term revenue projection according to API."),
    ("numAnalystsEps", "Number of Analysts", "Quantity of experts covering this company."),
];

/// Static, ordered catalogue of report fields.
///
/// Registry order is the summary's row order; it never depends on which
/// sources answered. Shared read-only between all sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRegistry {
    defs: Vec<MetricDef>,
}

impl MetricRegistry {
    /// Build a registry from definitions in display order.
    ///
    /// # Errors
    /// Returns `ReportError::InvalidConfig` if two definitions share a source key.
    pub fn new(defs: Vec<MetricDef>) -> Result<Self, ReportError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for d in &defs {
            if !seen.insert(d.key.as_str()) {
                return Err(ReportError::InvalidConfig(format!(
                    "duplicate metric key in registry: {}",
                    d.key
                )));
            }
        }
        Ok(Self { defs })
    }

    /// The standard fifteen-row equity report.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            defs: STANDARD
                .iter()
                .map(|&(key, label, description)| MetricDef::new(key, label, description))
                .collect(),
        }
    }

    /// Definitions in display order.
    #[must_use]
    pub fn defs(&self) -> &[MetricDef] {
        &self.defs
    }

    /// Number of rows every summary built from this registry has.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Merge metric dictionaries in precedence order: on a key collision the
/// later dictionary wins.
#[must_use]
pub fn merge_maps(sources: &[MetricMap]) -> MetricMap {
    let mut out = MetricMap::new();
    for m in sources {
        out.extend(m.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    out
}

/// Build the summary table for `registry` from dictionaries in precedence
/// order (later wins on collisions).
///
/// The result always has exactly `registry.len()` rows in registry order; a
/// key that no dictionary supplies renders as `"N/A"`.
#[must_use]
pub fn merge(sources: &[MetricMap], registry: &MetricRegistry) -> SummaryTable {
    let merged = merge_maps(sources);
    let rows = registry
        .defs()
        .iter()
        .map(|def| MetricRow {
            label: def.label.clone(),
            value: merged
                .get(&def.key)
                .map_or_else(|| NOT_AVAILABLE.to_string(), Clone::clone),
            description: def.description.clone(),
        })
        .collect();
    SummaryTable::from_rows(rows)
}
