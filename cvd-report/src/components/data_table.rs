//! HTML table of preformatted cells.

use crate::surface::DataTable;
use maud::{html, Markup};

/// Table markup. Rows of a location-keyed table carry `data-location` so
/// the location control can show and hide them.
pub fn data_table(table: &DataTable) -> Markup {
    let keyed = table.visible_locations.is_some();
    let any_visible = table.visible_rows().next().is_some();
    html! {
        table class="cvd-table" style="border-collapse: collapse; margin: 8px 0;" {
            thead {
                tr {
                    @for column in &table.columns {
                        th style="text-align: left; padding: 4px 8px; border-bottom: 2px solid #ccc;" { (column) }
                    }
                }
            }
            tbody {
                tr class="cvd-empty" hidden[any_visible] {
                    td colspan=(table.columns.len().max(1)) style="padding: 4px 8px; color: #666;" {
                        "No data for the current selection."
                    }
                }
                @for row in &table.rows {
                    tr data-location=[keyed.then(|| row.first()).flatten()] hidden[!table.is_row_visible(row)] {
                        @for cell in row {
                            td style="padding: 4px 8px; border-bottom: 1px solid #eee;" { (cell) }
                        }
                    }
                }
            }
        }
    }
}
