//! Download link for a file written next to the page.

use crate::surface::Download;
use maud::{html, Markup};

pub fn download_button(download: &Download) -> Markup {
    html! {
        a href=(download.file_name) download=(download.file_name) type=(download.mime)
            style="display: inline-block; padding: 6px 12px; border: 1px solid #2464a6; border-radius: 4px; color: #2464a6; text-decoration: none;" {
            (download.label)
        }
    }
}
