//! Export of the cleaned table as comma-separated text.
//!
//! Output is UTF-8 with a header row and no index column. Columns follow
//! the allow-list order, restricted to those present in the table, so the
//! file loads back into an equal table.

use crate::column::{DATE_COLUMN, LOCATION_COLUMN};
use crate::error::Result;
use crate::table::ObservationTable;
use csv::WriterBuilder;
use cvd_utils::dates::format_date;
use std::io::Write;
use std::path::Path;

/// File name offered for the cleaned dataset download.
pub const EXPORT_FILE_NAME: &str = "Cleaned_COVID19_Data.csv";

/// MIME type of the exported file.
pub const EXPORT_MIME: &str = "text/csv";

/// Write `table` as CSV into `writer`.
pub fn write_csv<W: Write>(table: &ObservationTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b',').from_writer(writer);

    let metrics: Vec<_> = table.columns.iter().collect();
    let mut header = vec![LOCATION_COLUMN, DATE_COLUMN];
    header.extend(metrics.iter().map(|m| m.column_name()));
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.location().unwrap_or("").to_string());
        record.push(format_date(&row.date));
        for metric in &metrics {
            record.push(row.value(*metric).unwrap_or(0.0).to_string());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `table` as a CSV string.
pub fn to_csv_string(table: &ObservationTable) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    // The writer only ever receives UTF-8 text.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `table` as CSV to a file at `path`.
pub fn write_csv_path<P: AsRef<Path>>(table: &ObservationTable, path: P) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(table, std::io::BufWriter::new(file))?;
    log::info!(
        "[CVD] export: wrote {} rows to {}",
        table.len(),
        path.as_ref().display()
    );
    Ok(())
}
