use crate::column::{ColumnSet, Metric, DATE_COLUMN, LOCATION_COLUMN};
use crate::error::{OwidError, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use cvd_utils::dates::parse_observation_date;

/// Cell values treated as missing in numeric columns; they load as `0`.
pub const MISSING_MARKERS: [&str; 10] = [
    "", "NA", "N/A", "n/a", "#N/A", "NaN", "nan", "null", "None", "<NA>",
];

/// A single (location, date) row of the dataset.
///
/// `values` holds one slot per allow-listed metric. A slot is `None` only
/// when the metric column is absent from the table the row belongs to;
/// missing cells of a present column load as `Some(0.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub location: Option<String>,
    pub date: NaiveDate,
    values: [Option<f64>; Metric::ALL.len()],
}

impl Observation {
    /// A row with no metric values.
    pub fn new(location: Option<String>, date: NaiveDate) -> Self {
        Self {
            location,
            date,
            values: [None; Metric::ALL.len()],
        }
    }

    pub fn set_value(&mut self, metric: Metric, value: Option<f64>) {
        self.values[metric.index()] = value;
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values[metric.index()]
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// Positions of the allow-listed columns inside a CSV header.
///
/// Built once per source; every row is then projected through it, so
/// columns outside the allow-list are never looked at.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    location: usize,
    date: usize,
    metrics: Vec<(Metric, usize)>,
}

impl HeaderIndex {
    /// Resolve column positions from a header row.
    ///
    /// `location` and `date` are required; metric columns are optional.
    /// A header with neither is reported as [`OwidError::UnrecognizedHeader`].
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let (location, date) = match (position(LOCATION_COLUMN), position(DATE_COLUMN)) {
            (Some(location), Some(date)) => (location, date),
            (None, Some(_)) => return Err(OwidError::MissingColumn(LOCATION_COLUMN)),
            (Some(_), None) => return Err(OwidError::MissingColumn(DATE_COLUMN)),
            (None, None) => {
                let mut preview: String = headers.iter().collect::<Vec<_>>().join(",");
                if let Some((cut, _)) = preview.char_indices().nth(60) {
                    preview.truncate(cut);
                }
                return Err(OwidError::UnrecognizedHeader(preview));
            }
        };
        let metrics = Metric::ALL
            .into_iter()
            .filter_map(|m| position(m.column_name()).map(|idx| (m, idx)))
            .collect();
        Ok(Self {
            location,
            date,
            metrics,
        })
    }

    /// The metrics this header carries.
    pub fn columns(&self) -> ColumnSet {
        self.metrics.iter().map(|(m, _)| *m).collect()
    }

    /// Convert one CSV record into an [`Observation`].
    ///
    /// `line` is the 1-based line number used in error messages.
    pub fn parse_record(&self, record: &StringRecord, line: u64) -> Result<Observation> {
        let raw_date = record.get(self.date).unwrap_or("");
        let date = parse_observation_date(raw_date).map_err(|_| OwidError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;

        // Text is kept verbatim; only a blank cell counts as missing.
        let location = record
            .get(self.location)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        let mut observation = Observation::new(location, date);
        for (metric, idx) in &self.metrics {
            let raw = record.get(*idx).unwrap_or("");
            let value = parse_metric_cell(raw).ok_or_else(|| OwidError::InvalidNumber {
                line,
                column: metric.column_name(),
                value: raw.to_string(),
            })?;
            observation.set_value(*metric, Some(value));
        }
        Ok(observation)
    }
}

/// Parse a numeric cell; missing markers become `0.0`.
///
/// Returns `None` for text that is neither a number nor a missing marker.
pub fn parse_metric_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        return Some(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => Some(0.0),
        Ok(v) => Some(v),
        Err(_) => None,
    }
}
