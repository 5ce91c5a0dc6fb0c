//! The `export` command: write the cleaned dataset.

use crate::SourceArgs;
use cvd_owid::export::write_csv_path;
use log::info;
use std::path::Path;

pub fn run_export(source: &SourceArgs, output: &Path) -> anyhow::Result<()> {
    let table = source.load()?;
    write_csv_path(&table, output)?;
    info!("Exported {} rows to {}", table.len(), output.display());
    Ok(())
}
