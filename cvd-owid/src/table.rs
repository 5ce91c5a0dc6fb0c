use crate::column::ColumnSet;
use crate::date_range::DateRange;
use crate::error::Result;
use crate::observation::{HeaderIndex, Observation};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// The cleaned dataset: rows in source order plus the metrics present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationTable {
    pub columns: ColumnSet,
    pub rows: Vec<Observation>,
}

impl ObservationTable {
    pub fn new(columns: ColumnSet, rows: Vec<Observation>) -> Self {
        Self { columns, rows }
    }

    /// Parse a delimited dataset with a header row.
    ///
    /// The header is projected onto the allow-list, dates are parsed and
    /// missing numeric cells are filled with `0`. Any unparseable date or
    /// number fails the whole parse.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let index = HeaderIndex::from_headers(rdr.headers()?)?;
        let columns = index.columns();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            rows.push(index.parse_record(&record, line)?);
        }
        log::info!(
            "[CVD] table: parsed {} observations with {} metric columns",
            rows.len(),
            columns.len()
        );
        Ok(Self { columns, rows })
    }

    pub fn from_csv_str(csv_data: &str) -> Result<Self> {
        Self::from_reader(csv_data.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct non-missing locations in order of first appearance.
    pub fn locations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.location())
            .filter(|loc| seen.insert(*loc))
            .map(str::to_string)
            .collect()
    }

    /// Earliest and latest date in the table, `None` when empty.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some(DateRange(min, max))
    }
}
