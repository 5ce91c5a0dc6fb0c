//! Multi-select list of locations.

use crate::surface::MultiSelect;
use maud::{html, Markup};

pub const MULTI_SELECT_ID: &str = "location-select";

/// Multi-select control; selected options are marked `selected`.
pub fn multi_select(control: &MultiSelect) -> Markup {
    let size = control.options.len().clamp(1, 12);
    html! {
        div style="margin: 8px 0;" {
            label for=(MULTI_SELECT_ID) style="font-weight: bold; display: block; margin-bottom: 4px;" {
                (control.label)
            }
            select id=(MULTI_SELECT_ID) multiple size=(size) style="min-width: 240px;" {
                @for option in &control.options {
                    option value=(option) selected[control.selected.contains(option)] { (option) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_selected_options() {
        let control = MultiSelect {
            label: "Select Countries".to_string(),
            options: vec!["Brazil".to_string(), "Chile".to_string()],
            selected: vec!["Chile".to_string()],
        };
        let html = multi_select(&control).into_string();
        assert!(html.contains("Select Countries"));
        assert!(html.contains(r#"<option value="Brazil">Brazil</option>"#));
        assert!(html.contains(r#"<option value="Chile" selected>Chile</option>"#));
    }
}
