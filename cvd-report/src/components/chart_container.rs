//! Chart containers: an empty div for ECharts, or an inline SVG image.

use maud::{html, Markup, PreEscaped};

/// A container div for an ECharts instance.
pub fn chart_container(id: &str, min_height: u32) -> Markup {
    let style = format!("min-height: {min_height}px; position: relative; width: 100%;");
    html! {
        div style=(style) {
            div id=(id) class="cvd-echart" style=(style) {}
        }
    }
}

/// A static chart as a linked `<img>`, with the SVG markup as fallback
/// when the file is not next to the page.
pub fn static_chart(file_name: &str, title: &str, svg: &str) -> Markup {
    html! {
        figure style="margin: 8px 0;" {
            object data=(file_name) type="image/svg+xml" aria-label=(title) style="width: 100%; max-width: 900px;" {
                (PreEscaped(svg))
            }
        }
    }
}
