//! Insights text and tables for the dashboard and the terminal.

use crate::surface::DataTable;
use cvd_db::models::{LocationValue, SnapshotRow};
use cvd_owid::column::Metric;
use cvd_owid::date_range::DateRange;
use cvd_utils::numbers::format_count;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One line of a ranking as shown to the user.
#[derive(Debug, Clone, Tabled)]
pub struct RankingRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Country")]
    pub location: String,
    #[tabled(rename = "Total Cases")]
    pub total_cases: String,
}

pub fn ranking_rows(ranking: &[LocationValue]) -> Vec<RankingRow> {
    ranking
        .iter()
        .enumerate()
        .map(|(i, entry)| RankingRow {
            rank: i + 1,
            location: entry.location.clone(),
            total_cases: format_count(entry.value),
        })
        .collect()
}

/// Markdown for the insights section: the ranking and the analyzed range.
pub fn insights_markdown(ranking: &[LocationValue], range: DateRange) -> String {
    let table = if ranking.is_empty() {
        "_No case data available._".to_string()
    } else {
        Table::new(ranking_rows(ranking))
            .with(Style::markdown())
            .to_string()
    };
    format!(
        "**Top {} countries with highest cases:**\n\n{}\n\n**Date range analyzed:** {}\n",
        ranking.len(),
        table,
        range
    )
}

pub fn ranking_table(ranking: &[LocationValue]) -> DataTable {
    DataTable {
        columns: vec!["Rank".into(), "Country".into(), "Total Cases".into()],
        rows: ranking_rows(ranking)
            .into_iter()
            .map(|r| vec![r.rank.to_string(), r.location, r.total_cases])
            .collect(),
        visible_locations: None,
    }
}

/// Latest snapshot as a table: country, date, then one column per metric.
///
/// `metrics` should be the ones the snapshot was projected onto; a row
/// missing one of them shows an empty cell.
pub fn snapshot_table(rows: &[SnapshotRow], metrics: &[Metric]) -> DataTable {
    let mut columns = vec!["Country".to_string(), "Date".to_string()];
    columns.extend(metrics.iter().map(|m| m.label().to_string()));

    let rows = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.location.clone(), cvd_utils::dates::format_date(&row.date)];
            cells.extend(
                metrics
                    .iter()
                    .map(|m| row.value(*m).map(format_count).unwrap_or_default()),
            );
            cells
        })
        .collect();

    DataTable {
        columns,
        rows,
        visible_locations: None,
    }
}

fn build(table: &DataTable) -> Table {
    let mut builder = Builder::default();
    builder.push_record(table.columns.clone());
    for row in &table.rows {
        builder.push_record(row.clone());
    }
    builder.build()
}

/// Render a table for a terminal.
pub fn to_terminal(table: &DataTable) -> String {
    build(table).with(Style::psql()).to_string()
}
