//! The `top` and `latest` commands: terminal tables.

use crate::{SelectionArgs, SourceArgs};
use cvd_db::Database;
use cvd_owid::column::Metric;
use cvd_owid::table::ObservationTable;
use cvd_report::state::Selection;
use cvd_report::summary::{ranking_table, snapshot_table, to_terminal};

pub fn run_top(source: &SourceArgs, top: usize) -> anyhow::Result<()> {
    let table = source.load()?;
    println!("{}", top_report(&table, top)?);
    Ok(())
}

pub fn run_latest(source: &SourceArgs, selection: &SelectionArgs) -> anyhow::Result<()> {
    let table = source.load()?;
    println!("{}", latest_report(&table, selection)?);
    Ok(())
}

/// Ranking of locations by maximum total cases.
pub fn top_report(table: &ObservationTable, top: usize) -> anyhow::Result<String> {
    let db = Database::from_table(table)?;
    let ranking = db.top_n_by_total_cases(top)?;
    Ok(to_terminal(&ranking_table(&ranking)))
}

/// Latest observation of every selected location within the range.
pub fn latest_report(table: &ObservationTable, selection: &SelectionArgs) -> anyhow::Result<String> {
    let selection = Selection::resolve(
        table,
        &selection.locations,
        selection.start,
        selection.end,
    );
    let db = Database::from_table(table)?;
    let filtered = Database::from_table(&db.filter(&selection.locations, selection.date_range)?)?;

    let metrics: Vec<Metric> = Metric::SNAPSHOT
        .into_iter()
        .filter(|m| table.columns.contains(*m))
        .collect();
    let rows = filtered.latest_snapshot(&metrics)?;
    Ok(to_terminal(&snapshot_table(&rows, &metrics)))
}
