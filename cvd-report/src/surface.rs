//! The display surface the presenter renders onto.
//!
//! A surface accepts finished artifacts: chart images, chart documents,
//! tables, input controls, text blocks and downloads. It decides how they
//! are shown or stored.

use cvd_owid::date_range::DateRange;

/// A rendered static chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticChart {
    /// Stable identifier, also used as the artifact file stem.
    pub id: String,
    pub title: String,
    /// Complete SVG document.
    pub svg: String,
}

/// An interactive chart: an ECharts option document.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveChart {
    /// DOM id of the chart container.
    pub id: String,
    pub title: String,
    pub option: serde_json::Value,
}

/// A rectangular table of already formatted cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// When set, rows are keyed by the location in their first cell and
    /// follow the location control; only these locations start visible.
    pub visible_locations: Option<Vec<String>>,
}

impl DataTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_row_visible(&self, row: &[String]) -> bool {
        match (&self.visible_locations, row.first()) {
            (None, _) => true,
            (Some(visible), Some(location)) => visible.contains(location),
            (Some(_), None) => false,
        }
    }

    /// Rows shown before any control is touched.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Vec<String>> + '_ {
        self.rows.iter().filter(|row| self.is_row_visible(row))
    }
}

/// A multi-select input control.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelect {
    pub label: String,
    pub options: Vec<String>,
    pub selected: Vec<String>,
}

/// A date-range input control.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeInput {
    pub label: String,
    pub value: DateRange,
    /// Earliest and latest selectable dates, if the data has any.
    pub bounds: Option<DateRange>,
}

/// A file offered for download.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub label: String,
    pub file_name: String,
    pub mime: String,
    pub content: String,
}

/// An output target for the presenter.
pub trait DisplaySurface {
    fn title(&mut self, text: &str) -> anyhow::Result<()>;

    fn header(&mut self, text: &str) -> anyhow::Result<()>;

    fn subheader(&mut self, text: &str) -> anyhow::Result<()>;

    /// A block of markdown text.
    fn markdown(&mut self, text: &str) -> anyhow::Result<()>;

    fn static_chart(&mut self, chart: &StaticChart) -> anyhow::Result<()>;

    fn interactive_chart(&mut self, chart: &InteractiveChart) -> anyhow::Result<()>;

    fn table(&mut self, table: &DataTable) -> anyhow::Result<()>;

    fn multi_select(&mut self, control: &MultiSelect) -> anyhow::Result<()>;

    fn date_range_input(&mut self, control: &DateRangeInput) -> anyhow::Result<()>;

    fn download(&mut self, download: &Download) -> anyhow::Result<()>;
}
