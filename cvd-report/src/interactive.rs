//! ECharts option documents for the per-location trend charts.
//!
//! Each chart is a plain JSON value; the HTML surface embeds it and the
//! init script in `assets/js/echarts-init.js` hands it to `echarts.init`.

use crate::surface::InteractiveChart;
use cvd_db::models::LocationDateValue;
use cvd_owid::column::Metric;
use serde_json::{json, Map, Value};

/// A per-location trend chart of the interactive section.
#[derive(Debug, Clone, Copy)]
pub struct TrendChart {
    pub metric: Metric,
    pub heading: &'static str,
    pub title: &'static str,
}

/// Trend charts in display order.
///
/// Each is only drawn when its column was loaded.
pub const TREND_CHARTS: [TrendChart; 3] = [
    TrendChart {
        metric: Metric::TotalCases,
        heading: "Total COVID-19 Cases Over Time",
        title: "Total COVID-19 Cases Trend",
    },
    TrendChart {
        metric: Metric::NewCases,
        heading: "Daily New Cases Over Time",
        title: "Daily New Cases Trend",
    },
    TrendChart {
        metric: Metric::PeopleVaccinated,
        heading: "Vaccination Progress",
        title: "Vaccination Trend",
    },
];

/// DOM id for the chart of `metric`.
pub fn chart_id(metric: Metric) -> String {
    format!("trend-{}", metric.column_name().replace('_', "-"))
}

/// One line per location in `locations`, in that order.
///
/// Points of other locations are ignored; a location without points still
/// gets an (empty) series so the legend stays stable. Only the `selected`
/// locations start visible, the rest are switched off in the legend so the
/// page's location control can bring them in without a re-run.
pub fn trend_chart(
    metric: Metric,
    title: &str,
    points: &[LocationDateValue],
    locations: &[String],
    selected: &[String],
) -> InteractiveChart {
    let series: Vec<Value> = locations
        .iter()
        .map(|location| {
            let data: Vec<Value> = points
                .iter()
                .filter(|p| &p.location == location)
                .map(|p| json!([cvd_utils::dates::format_date(&p.date), p.value]))
                .collect();
            json!({
                "name": location,
                "type": "line",
                "showSymbol": false,
                "data": data,
            })
        })
        .collect();
    let shown: Map<String, Value> = locations
        .iter()
        .map(|location| (location.clone(), Value::Bool(selected.contains(location))))
        .collect();

    log::debug!(
        "[CVD] interactive: {} with {} series, {} shown",
        metric,
        series.len(),
        selected.len()
    );

    InteractiveChart {
        id: chart_id(metric),
        title: title.to_string(),
        option: json!({
            "title": { "text": title },
            "tooltip": { "trigger": "axis" },
            "legend": { "type": "scroll", "data": locations, "selected": shown, "top": 30 },
            "grid": { "top": 70, "left": 80, "right": 30, "bottom": 40 },
            "xAxis": { "type": "time", "name": "Date" },
            "yAxis": { "type": "value", "name": metric.label() },
            "series": series,
        }),
    }
}
