//! The full dashboard flow: static insights, interactive trends, latest
//! statistics, insights text and the cleaned-data download.

use crate::interactive::{trend_chart, TREND_CHARTS};
use crate::state::Selection;
use crate::static_charts::{global_series_chart, top_cases_chart};
use crate::summary::{insights_markdown, snapshot_table};
use crate::surface::{DateRangeInput, DisplaySurface, Download, MultiSelect};
use cvd_db::Database;
use cvd_owid::column::Metric;
use cvd_owid::export::{to_csv_string, EXPORT_FILE_NAME, EXPORT_MIME};
use cvd_owid::table::ObservationTable;

pub const PAGE_TITLE: &str = "COVID-19 Data Analysis & Interactive Dashboard";
const INTRO: &str =
    "Analyze global COVID-19 trends with both static analysis and interactive charts.";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Number of locations in the top cases bar chart.
    pub top_n: usize,
    /// Number of locations listed in the insights text.
    pub summary_top: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            summary_top: 5,
        }
    }
}

/// What the flow produced besides the rendering effects.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    /// Markdown shown in the insights section.
    pub insights: String,
    /// Rows left after applying the selection.
    pub filtered_rows: usize,
}

/// Render the dashboard for `table` onto `surface`.
///
/// Static insights and the download use the whole table; trends, the
/// latest statistics and the analyzed range follow `selection`.
pub fn render_dashboard(
    surface: &mut dyn DisplaySurface,
    table: &ObservationTable,
    selection: &Selection,
    config: &DashboardConfig,
) -> anyhow::Result<DashboardReport> {
    let db = Database::from_table(table)?;

    surface.title(PAGE_TITLE)?;
    surface.markdown(INTRO)?;

    surface.header("Static Global Insights")?;
    let top_title = format!("Top {} Countries by Total COVID-19 Cases", config.top_n);
    surface.subheader(&top_title)?;
    let ranking = db.top_n_by_total_cases(config.top_n)?;
    surface.static_chart(&top_cases_chart(&top_title, &ranking)?)?;

    surface.subheader("Global Daily New Cases Trend")?;
    let global = db.global_daily_series(Metric::NewCases)?;
    surface.static_chart(&global_series_chart("Global Daily New Cases Over Time", &global)?)?;

    surface.header("Interactive Dashboard")?;
    let all_locations = db.locations()?;
    surface.multi_select(&MultiSelect {
        label: "Select Countries".to_string(),
        options: all_locations.clone(),
        selected: selection.locations.clone(),
    })?;
    surface.date_range_input(&DateRangeInput {
        label: "Select Date Range".to_string(),
        value: selection.date_range,
        bounds: db.date_bounds()?,
    })?;

    // Every location in range is carried so the page controls can switch
    // series and rows on; only the selected ones start visible.
    let in_range = db.filter(&all_locations, selection.date_range)?;
    let in_range_db = Database::from_table(&in_range)?;
    for trend in TREND_CHARTS {
        if !table.columns.contains(trend.metric) {
            log::warn!(
                "[CVD] dashboard: skipping {:?}, column {} not loaded",
                trend.title,
                trend.metric
            );
            continue;
        }
        surface.subheader(trend.heading)?;
        let points = in_range_db.location_series(trend.metric)?;
        surface.interactive_chart(&trend_chart(
            trend.metric,
            trend.title,
            &points,
            &all_locations,
            &selection.locations,
        ))?;
    }

    surface.header("Latest COVID-19 Statistics")?;
    let metrics: Vec<Metric> = Metric::SNAPSHOT
        .into_iter()
        .filter(|m| table.columns.contains(*m))
        .collect();
    let latest = in_range_db.latest_snapshot(&metrics)?;
    let mut latest_table = snapshot_table(&latest, &metrics);
    latest_table.visible_locations = Some(selection.locations.clone());
    surface.table(&latest_table)?;

    surface.header("Insights")?;
    let leaders = db.top_n_by_total_cases(config.summary_top)?;
    let insights = insights_markdown(&leaders, selection.date_range);
    surface.markdown(&insights)?;

    surface.download(&Download {
        label: "Download Cleaned Data (CSV)".to_string(),
        file_name: EXPORT_FILE_NAME.to_string(),
        mime: EXPORT_MIME.to_string(),
        content: to_csv_string(table)?,
    })?;

    let filtered_rows = in_range
        .rows
        .iter()
        .filter(|row| {
            row.location()
                .is_some_and(|loc| selection.locations.iter().any(|s| s == loc))
        })
        .count();
    log::info!(
        "[CVD] dashboard: rendered {} rows, {} after selection",
        table.len(),
        filtered_rows
    );
    Ok(DashboardReport {
        insights,
        filtered_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DataTable, InteractiveChart, StaticChart};
    use chrono::NaiveDate;
    use cvd_owid::date_range::DateRange;

    /// Records every call as a short string, plus the artifacts.
    #[derive(Default)]
    struct RecordingSurface {
        events: Vec<String>,
        interactive: Vec<InteractiveChart>,
        static_charts: Vec<StaticChart>,
        tables: Vec<DataTable>,
        selects: Vec<MultiSelect>,
        ranges: Vec<DateRangeInput>,
        downloads: Vec<Download>,
    }

    impl DisplaySurface for RecordingSurface {
        fn title(&mut self, text: &str) -> anyhow::Result<()> {
            self.events.push(format!("title:{text}"));
            Ok(())
        }
        fn header(&mut self, text: &str) -> anyhow::Result<()> {
            self.events.push(format!("header:{text}"));
            Ok(())
        }
        fn subheader(&mut self, text: &str) -> anyhow::Result<()> {
            self.events.push(format!("subheader:{text}"));
            Ok(())
        }
        fn markdown(&mut self, _text: &str) -> anyhow::Result<()> {
            self.events.push("markdown".to_string());
            Ok(())
        }
        fn static_chart(&mut self, chart: &StaticChart) -> anyhow::Result<()> {
            self.events.push(format!("static:{}", chart.title));
            self.static_charts.push(chart.clone());
            Ok(())
        }
        fn interactive_chart(&mut self, chart: &InteractiveChart) -> anyhow::Result<()> {
            self.events.push(format!("interactive:{}", chart.title));
            self.interactive.push(chart.clone());
            Ok(())
        }
        fn table(&mut self, table: &DataTable) -> anyhow::Result<()> {
            self.events.push("table".to_string());
            self.tables.push(table.clone());
            Ok(())
        }
        fn multi_select(&mut self, control: &MultiSelect) -> anyhow::Result<()> {
            self.events.push(format!("select:{}", control.label));
            self.selects.push(control.clone());
            Ok(())
        }
        fn date_range_input(&mut self, control: &DateRangeInput) -> anyhow::Result<()> {
            self.events.push(format!("range:{}", control.label));
            self.ranges.push(control.clone());
            Ok(())
        }
        fn download(&mut self, download: &Download) -> anyhow::Result<()> {
            self.events.push(format!("download:{}", download.label));
            self.downloads.push(download.clone());
            Ok(())
        }
    }

    const CSV: &str = "\
location,date,total_cases,new_cases,people_vaccinated
India,2021-01-01,10,10,
India,2021-01-02,20,10,5
Brazil,2021-01-01,5,5,
Chile,2021-01-02,7,7,1
";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn render(csv: &str, locations: &[&str], range: Option<DateRange>) -> (RecordingSurface, DashboardReport) {
        let table = ObservationTable::from_csv_str(csv).unwrap();
        let requested: Vec<String> = locations.iter().map(|s| s.to_string()).collect();
        let mut selection = Selection::resolve(&table, &requested, None, None);
        if let Some(range) = range {
            selection.date_range = range;
        }
        let mut surface = RecordingSurface::default();
        let report =
            render_dashboard(&mut surface, &table, &selection, &DashboardConfig::default()).unwrap();
        (surface, report)
    }

    #[test]
    fn renders_sections_in_order() {
        let (surface, report) = render(CSV, &[], None);
        assert_eq!(
            surface.events,
            vec![
                "title:COVID-19 Data Analysis & Interactive Dashboard",
                "markdown",
                "header:Static Global Insights",
                "subheader:Top 10 Countries by Total COVID-19 Cases",
                "static:Top 10 Countries by Total COVID-19 Cases",
                "subheader:Global Daily New Cases Trend",
                "static:Global Daily New Cases Over Time",
                "header:Interactive Dashboard",
                "select:Select Countries",
                "range:Select Date Range",
                "subheader:Total COVID-19 Cases Over Time",
                "interactive:Total COVID-19 Cases Trend",
                "subheader:Daily New Cases Over Time",
                "interactive:Daily New Cases Trend",
                "subheader:Vaccination Progress",
                "interactive:Vaccination Trend",
                "header:Latest COVID-19 Statistics",
                "table",
                "header:Insights",
                "markdown",
                "download:Download Cleaned Data (CSV)",
            ]
        );
        // Default selection keeps only the known locations present.
        assert_eq!(surface.selects[0].selected, vec!["India", "Brazil"]);
        assert_eq!(surface.selects[0].options, vec!["India", "Brazil", "Chile"]);
        assert_eq!(report.filtered_rows, 3);
        assert!(report.insights.contains("Date range analyzed:** 2021-01-01 to 2021-01-02"));
    }

    #[test]
    fn vaccination_chart_needs_its_column() {
        let csv = "location,date,total_cases,new_cases\nIndia,2021-01-01,1,1\n";
        let (surface, _) = render(csv, &[], None);
        let titles: Vec<&str> = surface.interactive.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Total COVID-19 Cases Trend", "Daily New Cases Trend"]);
        assert_eq!(
            surface.tables[0].columns,
            vec!["Country", "Date", "Total Cases", "Daily New Cases"]
        );
    }

    #[test]
    fn latest_table_follows_selection() {
        let (surface, _) = render(CSV, &["India", "Chile"], None);
        let table = &surface.tables[0];
        let rows: Vec<(&str, &str)> = table
            .visible_rows()
            .map(|r| (r[0].as_str(), r[1].as_str()))
            .collect();
        assert_eq!(rows, vec![("Chile", "2021-01-02"), ("India", "2021-01-02")]);
        // Unselected locations are still there for the page control.
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][0], "Brazil");
    }

    #[test]
    fn trends_carry_every_location_in_range() {
        let range = DateRange(date("2021-01-02"), date("2021-01-02"));
        let (surface, report) = render(CSV, &["India"], Some(range));
        assert_eq!(report.filtered_rows, 1);

        let total = &surface.interactive[0];
        let series = total.option["series"].as_array().unwrap();
        let names: Vec<&str> = series.iter().map(|s| s["name"].as_str().unwrap()).collect();
        assert_eq!(names, surface.selects[0].options);
        assert_eq!(
            total.option["legend"]["selected"],
            serde_json::json!({ "India": true, "Brazil": false, "Chile": false })
        );
        // Brazil has no rows on the chosen day, Chile has one.
        assert!(series[1]["data"].as_array().unwrap().is_empty());
        assert_eq!(series[2]["data"], serde_json::json!([["2021-01-02", 7.0]]));
    }

    #[test]
    fn empty_selection_renders_empty_outputs() {
        let (surface, report) = render(
            CSV,
            &[],
            Some(DateRange(date("2021-02-01"), date("2021-01-01"))),
        );
        assert_eq!(report.filtered_rows, 0);
        assert!(surface.tables[0].is_empty());
        assert_eq!(surface.tables[0].visible_rows().count(), 0);
        for chart in &surface.interactive {
            for series in chart.option["series"].as_array().unwrap() {
                assert!(series["data"].as_array().unwrap().is_empty());
            }
        }
        // Static insights still use the whole table.
        assert!(surface.static_charts[0].svg.contains("India"));
    }

    #[test]
    fn download_holds_the_full_table() {
        let (surface, _) = render(CSV, &["Chile"], None);
        let download = &surface.downloads[0];
        assert_eq!(download.file_name, "Cleaned_COVID19_Data.csv");
        assert_eq!(download.mime, "text/csv");
        let reloaded = ObservationTable::from_csv_str(&download.content).unwrap();
        assert_eq!(reloaded.len(), 4);
    }
}
