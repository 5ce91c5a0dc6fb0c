//! Typed aggregate and filter queries.
//!
//! Every query reads the stored rows and returns fresh values; nothing
//! here writes to the database. Rows with a missing location take part
//! in per-date sums but never form a location group, and never match a
//! location filter.

use crate::models::{DateValue, LocationDateValue, LocationValue, MetricValue, SnapshotRow};
use crate::Database;
use chrono::NaiveDate;
use cvd_owid::column::Metric;
use cvd_owid::date_range::DateRange;
use cvd_owid::observation::Observation;
use cvd_owid::table::ObservationTable;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};
use std::collections::BTreeSet;

impl Database {
    /// Number of stored observations.
    pub fn count(&self) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// The `n` locations with the highest `total_cases`.
    ///
    /// Each location is ranked by the maximum of its cumulative
    /// `total_cases` counter. Sorted descending; equal values are ordered
    /// by location name ascending. Returns nothing when the table has no
    /// `total_cases` column.
    pub fn top_n_by_total_cases(&self, n: usize) -> anyhow::Result<Vec<LocationValue>> {
        if !self.columns.contains(Metric::TotalCases) || n == 0 {
            return Ok(Vec::new());
        }
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT location, MAX(total_cases) AS max_cases
             FROM observations
             WHERE location IS NOT NULL
             GROUP BY location
             ORDER BY max_cases DESC, location ASC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![n as i64], |row| {
                Ok(LocationValue {
                    location: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[CVD] query: top_n_by_total_cases returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Sum of `metric` across all locations for each date, ascending by date.
    ///
    /// Returns nothing when the table has no such column.
    pub fn global_daily_series(&self, metric: Metric) -> anyhow::Result<Vec<DateValue>> {
        if !self.columns.contains(metric) {
            log::warn!("[CVD] query: global_daily_series skipped, no {} column", metric);
            return Ok(Vec::new());
        }
        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT date, SUM({col}) AS total
             FROM observations
             GROUP BY date
             ORDER BY date",
            col = metric.column_name()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DateValue {
                    date: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[CVD] query: global_daily_series({}) returned {} records",
            metric,
            rows.len()
        );
        Ok(rows)
    }

    /// The most recent observation of every location, projected onto `metrics`.
    ///
    /// Among rows sharing a location's latest date, the one loaded last
    /// wins. Requested metrics that the table does not carry are left out
    /// of the projection. Rows come back ordered by date, then location.
    pub fn latest_snapshot(&self, metrics: &[Metric]) -> anyhow::Result<Vec<SnapshotRow>> {
        let projected: Vec<Metric> = metrics
            .iter()
            .copied()
            .filter(|m| self.columns.contains(*m))
            .collect();
        let mut select = vec!["location".to_string(), "date".to_string()];
        select.extend(projected.iter().map(|m| m.column_name().to_string()));

        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT {cols} FROM (
                 SELECT *, ROW_NUMBER() OVER (
                     PARTITION BY location ORDER BY date DESC, row_order DESC
                 ) AS rn
                 FROM observations
                 WHERE location IS NOT NULL
             )
             WHERE rn = 1
             ORDER BY date, location",
            cols = select.join(", ")
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(projected.len());
                for (i, metric) in projected.iter().enumerate() {
                    let value: Option<f64> = row.get(i + 2)?;
                    values.push(MetricValue {
                        metric: *metric,
                        value: value.unwrap_or(0.0),
                    });
                }
                Ok(SnapshotRow {
                    location: row.get(0)?,
                    date: row.get(1)?,
                    values,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[CVD] query: latest_snapshot returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Rows whose location is in `locations` and whose date lies in `range`.
    ///
    /// Returns a new table with the same columns, rows in source order. An
    /// empty location set or an empty range yields an empty table.
    pub fn filter(&self, locations: &[String], range: DateRange) -> anyhow::Result<ObservationTable> {
        let wanted: BTreeSet<&str> = locations.iter().map(String::as_str).collect();
        if wanted.is_empty() || range.is_empty() {
            return Ok(ObservationTable::new(self.columns, Vec::new()));
        }

        let metrics: Vec<Metric> = self.columns.iter().collect();
        let placeholders = vec!["?"; wanted.len()].join(", ");
        let sql = format!(
            "SELECT {cols} FROM observations
             WHERE location IN ({placeholders})
               AND date >= ? AND date <= ?
             ORDER BY row_order",
            cols = observation_columns(&metrics)
        );

        let mut bindings: Vec<Value> = wanted
            .iter()
            .map(|loc| Value::Text((*loc).to_string()))
            .collect();
        bindings.push(date_value(range.start()));
        bindings.push(date_value(range.end()));

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(bindings.iter()), |row| read_observation(row, &metrics))?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[CVD] query: filter kept {} records for {} locations, {}",
            rows.len(),
            wanted.len(),
            range
        );
        Ok(ObservationTable::new(self.columns, rows))
    }

    /// Per-location series of `metric` for multi-line charts.
    ///
    /// Ordered by location, then date. Returns nothing when the table has
    /// no such column.
    pub fn location_series(&self, metric: Metric) -> anyhow::Result<Vec<LocationDateValue>> {
        if !self.columns.contains(metric) {
            return Ok(Vec::new());
        }
        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT location, date, {col} FROM observations
             WHERE location IS NOT NULL
             ORDER BY location, date, row_order",
            col = metric.column_name()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LocationDateValue {
                    location: row.get(0)?,
                    date: row.get(1)?,
                    value: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[CVD] query: location_series({}) returned {} records",
            metric,
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct locations in order of first appearance.
    pub fn locations(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT location FROM observations
             WHERE location IS NOT NULL
             GROUP BY location
             ORDER BY MIN(row_order)",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Earliest and latest stored date, `None` when there are no rows.
    pub fn date_bounds(&self) -> anyhow::Result<Option<DateRange>> {
        let conn = self.conn.borrow();
        let (min, max): (Option<NaiveDate>, Option<NaiveDate>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM observations",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(min.zip(max).map(|(start, end)| DateRange(start, end)))
    }
}

fn observation_columns(metrics: &[Metric]) -> String {
    let mut cols = vec!["location", "date"];
    cols.extend(metrics.iter().map(|m| m.column_name()));
    cols.join(", ")
}

fn date_value(date: NaiveDate) -> Value {
    Value::Text(date.format("%Y-%m-%d").to_string())
}

fn read_observation(row: &Row<'_>, metrics: &[Metric]) -> rusqlite::Result<Observation> {
    let mut observation = Observation::new(row.get(0)?, row.get(1)?);
    for (i, metric) in metrics.iter().enumerate() {
        let value: Option<f64> = row.get(i + 2)?;
        observation.set_value(*metric, Some(value.unwrap_or(0.0)));
    }
    Ok(observation)
}
