//! Reusable maud fragments for the HTML dashboard.

mod chart_container;
mod chart_header;
mod data_table;
mod date_range_picker;
mod download_button;
mod multi_select;

pub use chart_container::{chart_container, static_chart};
pub use chart_header::chart_header;
pub use data_table::data_table;
pub use date_range_picker::date_range_picker;
pub use download_button::download_button;
pub use multi_select::multi_select;
