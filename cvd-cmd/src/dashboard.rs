//! The `dashboard` command: render the full HTML dashboard.

use crate::{SelectionArgs, SourceArgs};
use cvd_owid::table::ObservationTable;
use cvd_report::dashboard::{render_dashboard, DashboardConfig, DashboardReport};
use cvd_report::html::HtmlSurface;
use cvd_report::state::Selection;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const INSIGHTS_FILE_NAME: &str = "insights.md";

/// Load the dataset and write the dashboard into `out_dir`.
pub fn run_dashboard(
    source: &SourceArgs,
    selection: &SelectionArgs,
    out_dir: &Path,
    top: usize,
) -> anyhow::Result<()> {
    let table = source.load()?;
    let config = DashboardConfig {
        top_n: top,
        ..DashboardConfig::default()
    };
    let (index, report) = write_dashboard(&table, selection, out_dir, &config)?;
    info!(
        "Dashboard written to {} ({} rows selected)",
        index.display(),
        report.filtered_rows
    );
    println!("{}", index.display());
    Ok(())
}

/// Render `table` into `out_dir`; returns the path of `index.html`.
pub fn write_dashboard(
    table: &ObservationTable,
    selection: &SelectionArgs,
    out_dir: &Path,
    config: &DashboardConfig,
) -> anyhow::Result<(PathBuf, DashboardReport)> {
    let selection = Selection::resolve(
        table,
        &selection.locations,
        selection.start,
        selection.end,
    );
    let mut surface = HtmlSurface::create(out_dir)?;
    let report = render_dashboard(&mut surface, table, &selection, config)?;
    fs::write(out_dir.join(INSIGHTS_FILE_NAME), &report.insights)?;
    let index = surface.finish()?;
    Ok((index, report))
}
