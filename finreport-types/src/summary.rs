use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat metric dictionary returned by estimate and fundamentals sources,
/// keyed by the source's own field name.
pub type MetricMap = BTreeMap<String, String>;

/// Placeholder rendered for a metric that no source supplied.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the report summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Human-readable metric name.
    pub label: String,
    /// Metric value as supplied by a source, or `"N/A"`.
    pub value: String,
    /// Short economic interpretation of the metric.
    pub description: String,
}

impl MetricRow {
    /// Returns `true` if no source supplied this metric.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.value == NOT_AVAILABLE
    }
}

/// Fixed-shape summary: one row per metric registry entry, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryTable(Vec<MetricRow>);

impl SummaryTable {
    /// Wrap rows that are already in registry order.
    #[must_use]
    pub const fn from_rows(rows: Vec<MetricRow>) -> Self {
        Self(rows)
    }

    /// Rows in registry order.
    #[must_use]
    pub fn rows(&self) -> &[MetricRow] {
        &self.0
    }

    /// Look up a row by its label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&MetricRow> {
        self.0.iter().find(|r| r.label == label)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rows rendered as `"N/A"`.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.0.iter().filter(|r| r.is_missing()).count()
    }
}
