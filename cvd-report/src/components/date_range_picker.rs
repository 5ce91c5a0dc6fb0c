//! Date range picker with start and end date inputs.

use crate::surface::DateRangeInput;
use cvd_utils::dates::format_date;
use maud::{html, Markup};

pub const START_INPUT_ID: &str = "range-start";
pub const END_INPUT_ID: &str = "range-end";

/// Start and end date inputs, bounded by the data's dates when known.
pub fn date_range_picker(control: &DateRangeInput) -> Markup {
    let start = format_date(&control.value.start());
    let end = format_date(&control.value.end());
    let min = control.bounds.map(|b| format_date(&b.start()));
    let max = control.bounds.map(|b| format_date(&b.end()));

    html! {
        div style="margin: 8px 0;" {
            span style="font-weight: bold; display: block; margin-bottom: 4px;" { (control.label) }
            div style="display: flex; gap: 12px; align-items: center;" {
                label {
                    "From: "
                    input id=(START_INPUT_ID) type="date" value=(start) min=[min.as_deref()] max=[max.as_deref()];
                }
                label {
                    "To: "
                    input id=(END_INPUT_ID) type="date" value=(end) min=[min.as_deref()] max=[max.as_deref()];
                }
            }
            p style="margin: 4px 0 0 0; font-size: 12px; color: #666;" {
                "Charts zoom within " (start) " to " (end)
                ". Regenerate with --start/--end to load other dates."
            }
        }
    }
}
