//! Query result model structs: plain rows returned by the
//! [`Database`](crate::Database) queries. They derive `Serialize` with
//! dates in `YYYY-MM-DD` form.

use chrono::NaiveDate;
use cvd_owid::column::Metric;
use serde::Serialize;

/// A (location, value) pair, e.g. one entry of a top-N ranking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationValue {
    pub location: String,
    pub value: f64,
}

/// A single (date, value) pair used for line chart data points.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// A (location, date, value) triple for multi-line charts.
///
/// Each point identifies which location it belongs to, enabling the
/// chart to draw one line per location.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationDateValue {
    pub location: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// One projected metric of a snapshot row.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MetricValue {
    pub metric: Metric,
    pub value: f64,
}

/// The most recent observation of one location.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotRow {
    pub location: String,
    /// Date of the observation the values were taken from.
    pub date: NaiveDate,
    /// Projected metrics, in the order they were requested.
    pub values: Vec<MetricValue>,
}

impl SnapshotRow {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.metric == metric)
            .map(|v| v.value)
    }
}
