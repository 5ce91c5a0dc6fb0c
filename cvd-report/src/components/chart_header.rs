//! Section header above a chart.

use maud::{html, Markup};

pub fn chart_header(title: &str) -> Markup {
    html! {
        div style="margin-bottom: 8px;" {
            h3 style="margin: 0 0 4px 0; font-size: 16px;" { (title) }
        }
    }
}
