//! SVG charts for the static insights section.

use crate::surface::StaticChart;
use chrono::{Duration, NaiveDate};
use cvd_db::models::{DateValue, LocationValue};
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;

pub const TOP_CASES_ID: &str = "top_cases";
pub const GLOBAL_NEW_CASES_ID: &str = "global_new_cases";

const SIZE: (u32, u32) = (900, 540);
const FONT: &str = "sans-serif";

/// Ten evenly spaced samples of the viridis colormap.
const VIRIDIS: [RGBColor; 10] = [
    RGBColor(0x44, 0x01, 0x54),
    RGBColor(0x48, 0x28, 0x78),
    RGBColor(0x3e, 0x4a, 0x89),
    RGBColor(0x31, 0x68, 0x8e),
    RGBColor(0x26, 0x82, 0x8e),
    RGBColor(0x1f, 0x9e, 0x89),
    RGBColor(0x35, 0xb7, 0x79),
    RGBColor(0x6d, 0xcd, 0x59),
    RGBColor(0xb4, 0xde, 0x2c),
    RGBColor(0xfd, 0xe7, 0x25),
];

fn palette_index(index: usize, count: usize) -> usize {
    if count <= 1 {
        return 0;
    }
    index * (VIRIDIS.len() - 1) / (count - 1)
}

fn y_upper(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Bar chart of the top-N ranking, one bar per location.
pub fn top_cases_chart(title: &str, ranking: &[LocationValue]) -> anyhow::Result<StaticChart> {
    let mut svg = String::new();
    draw_top_cases(&mut svg, title, ranking)?;
    log::info!("[CVD] static_charts: rendered {} bars", ranking.len());
    Ok(StaticChart {
        id: TOP_CASES_ID.to_string(),
        title: title.to_string(),
        svg,
    })
}

fn draw_top_cases(svg: &mut String, title: &str, ranking: &[LocationValue]) -> anyhow::Result<()> {
    let root = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    if ranking.is_empty() {
        draw_empty(&root, title)?;
        root.present()?;
        return Ok(());
    }

    let max = ranking.iter().map(|r| r.value).fold(0.0f64, f64::max);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 22))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(90)
        .build_cartesian_2d((0..ranking.len()).into_segmented(), 0f64..y_upper(max))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ranking.len())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(idx) if *idx < ranking.len() => ranking[*idx].location.clone(),
            _ => String::new(),
        })
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .y_desc("Total Cases")
        .y_label_formatter(&|v| cvd_utils::numbers::format_compact(*v))
        .draw()?;

    let count = ranking.len();
    chart.draw_series(ranking.iter().enumerate().map(|(idx, entry)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(idx), 0.0),
                (SegmentValue::Exact(idx + 1), entry.value),
            ],
            VIRIDIS[palette_index(idx, count)].filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// Line chart of a per-date series.
pub fn global_series_chart(title: &str, series: &[DateValue]) -> anyhow::Result<StaticChart> {
    let mut svg = String::new();
    draw_global_series(&mut svg, title, series)?;
    log::info!("[CVD] static_charts: rendered {} points", series.len());
    Ok(StaticChart {
        id: GLOBAL_NEW_CASES_ID.to_string(),
        title: title.to_string(),
        svg,
    })
}

fn draw_global_series(svg: &mut String, title: &str, series: &[DateValue]) -> anyhow::Result<()> {
    let root = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => {
            draw_empty(&root, title)?;
            root.present()?;
            return Ok(());
        }
    };
    // A one-day series still needs a non-degenerate axis.
    let end: NaiveDate = if last > first { last } else { first + Duration::days(1) };
    let x_range: RangedDate<NaiveDate> = (first..end).into();
    let max = series.iter().map(|p| p.value).fold(0.0f64, f64::max);
    let min = series.iter().map(|p| p.value).fold(0.0f64, f64::min);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, min..y_upper(max))?;

    chart
        .configure_mesh()
        .x_labels(10)
        .x_label_formatter(&|d| cvd_utils::dates::format_date(d))
        .x_desc("Date")
        .y_desc("New Cases")
        .y_label_formatter(&|v| cvd_utils::numbers::format_compact(*v))
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.iter().map(|p| (p.date, p.value)),
        &VIRIDIS[2],
    ))?;

    root.present()?;
    Ok(())
}

fn draw_empty(root: &DrawingArea<SVGBackend<'_>, Shift>, title: &str) -> anyhow::Result<()> {
    let (width, height) = root.dim_in_pixel();
    let center_x = width as i32 / 2;
    root.draw(&Text::new(
        title.to_string(),
        (20, 20),
        (FONT, 22).into_font().color(&BLACK),
    ))?;
    root.draw(&Text::new(
        "No data",
        (center_x - 30, height as i32 / 2),
        (FONT, 18).into_font().color(&BLACK),
    ))?;
    Ok(())
}
