//! A display surface that writes a self-contained HTML dashboard.
//!
//! Blocks are collected in call order. Static charts and downloads are
//! also written as files into the output directory; [`HtmlSurface::finish`]
//! writes `index.html` with the ECharts bootstrap.

use crate::components;
use crate::surface::{
    DataTable, DateRangeInput, DisplaySurface, Download, InteractiveChart, MultiSelect,
    StaticChart,
};
use anyhow::Context;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE_NAME: &str = "index.html";
const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";
static ECHARTS_INIT_JS: &str = include_str!("../assets/js/echarts-init.js");

pub struct HtmlSurface {
    out_dir: PathBuf,
    page_title: String,
    blocks: Vec<Markup>,
    charts: Vec<serde_json::Value>,
}

impl HtmlSurface {
    /// Create the surface, creating `out_dir` if needed.
    pub fn create<P: AsRef<Path>>(out_dir: P) -> anyhow::Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;
        Ok(Self {
            out_dir,
            page_title: String::new(),
            blocks: Vec::new(),
            charts: Vec::new(),
        })
    }

    fn write_artifact(&self, file_name: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.out_dir.join(file_name);
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        log::info!("[CVD] html: wrote {}", path.display());
        Ok(path)
    }

    /// Render the collected blocks into a complete page.
    pub fn render(&self) -> String {
        // Keep "</script>" inside option strings from closing the tag.
        let charts_json = serde_json::Value::Array(self.charts.clone())
            .to_string()
            .replace("</", "<\\/");
        let page = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (self.page_title) }
                    script src=(ECHARTS_CDN) {}
                }
                body style="font-family: sans-serif; max-width: 1100px; margin: 0 auto; padding: 16px;" {
                    @for block in &self.blocks {
                        (block)
                    }
                    script { (PreEscaped(format!("window.__cvdCharts = {charts_json};"))) }
                    script { (PreEscaped(ECHARTS_INIT_JS)) }
                }
            }
        };
        page.into_string()
    }

    /// Write `index.html` and return its path.
    pub fn finish(self) -> anyhow::Result<PathBuf> {
        let page = self.render();
        self.write_artifact(INDEX_FILE_NAME, &page)
    }
}

impl DisplaySurface for HtmlSurface {
    fn title(&mut self, text: &str) -> anyhow::Result<()> {
        if self.page_title.is_empty() {
            self.page_title = text.to_string();
        }
        self.blocks.push(html! { h1 { (text) } });
        Ok(())
    }

    fn header(&mut self, text: &str) -> anyhow::Result<()> {
        self.blocks.push(html! { h2 style="margin-top: 32px;" { (text) } });
        Ok(())
    }

    fn subheader(&mut self, text: &str) -> anyhow::Result<()> {
        self.blocks.push(components::chart_header(text));
        Ok(())
    }

    fn markdown(&mut self, text: &str) -> anyhow::Result<()> {
        // Shown preformatted; the text is also written to insights.md by the caller.
        self.blocks.push(html! {
            div class="cvd-markdown" style="white-space: pre-wrap; font-family: monospace;" { (text) }
        });
        Ok(())
    }

    fn static_chart(&mut self, chart: &StaticChart) -> anyhow::Result<()> {
        let file_name = format!("{}.svg", chart.id);
        self.write_artifact(&file_name, &chart.svg)?;
        self.blocks
            .push(components::static_chart(&file_name, &chart.title, &chart.svg));
        Ok(())
    }

    fn interactive_chart(&mut self, chart: &InteractiveChart) -> anyhow::Result<()> {
        self.blocks.push(components::chart_container(&chart.id, 400));
        self.charts.push(json!({ "id": chart.id, "option": chart.option }));
        Ok(())
    }

    fn table(&mut self, table: &DataTable) -> anyhow::Result<()> {
        self.blocks.push(components::data_table(table));
        Ok(())
    }

    fn multi_select(&mut self, control: &MultiSelect) -> anyhow::Result<()> {
        self.blocks.push(components::multi_select(control));
        Ok(())
    }

    fn date_range_input(&mut self, control: &DateRangeInput) -> anyhow::Result<()> {
        self.blocks.push(components::date_range_picker(control));
        Ok(())
    }

    fn download(&mut self, download: &Download) -> anyhow::Result<()> {
        self.write_artifact(&download.file_name, &download.content)?;
        self.blocks.push(components::download_button(download));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_page_and_artifacts() {
        let dir = tempdir().unwrap();
        let mut surface = HtmlSurface::create(dir.path().join("out")).unwrap();
        surface.title("Dashboard").unwrap();
        surface
            .static_chart(&StaticChart {
                id: "top_cases".to_string(),
                title: "Top".to_string(),
                svg: "<svg></svg>".to_string(),
            })
            .unwrap();
        surface
            .interactive_chart(&InteractiveChart {
                id: "trend-new-cases".to_string(),
                title: "Trend".to_string(),
                option: json!({ "series": [], "title": { "text": "</script>" } }),
            })
            .unwrap();
        surface
            .download(&Download {
                label: "Download".to_string(),
                file_name: "data.csv".to_string(),
                mime: "text/csv".to_string(),
                content: "location,date\n".to_string(),
            })
            .unwrap();

        let index = surface.finish().unwrap();
        let out = dir.path().join("out");
        assert_eq!(index, out.join(INDEX_FILE_NAME));
        assert_eq!(fs::read_to_string(out.join("top_cases.svg")).unwrap(), "<svg></svg>");
        assert_eq!(fs::read_to_string(out.join("data.csv")).unwrap(), "location,date\n");

        let page = fs::read_to_string(index).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Dashboard</title>"));
        assert!(page.contains(r#"id="trend-new-cases""#));
        assert!(page.contains("echarts.init"));
        assert!(page.contains("<\\/script>"));
    }

    #[test]
    fn first_title_names_the_page() {
        let dir = tempdir().unwrap();
        let mut surface = HtmlSurface::create(dir.path()).unwrap();
        surface.title("First").unwrap();
        surface.title("Second").unwrap();
        surface.header("Section").unwrap();
        surface.markdown("**bold** <b>").unwrap();
        let page = surface.render();
        assert!(page.contains("<title>First</title>"));
        assert!(page.contains("<h2"));
        assert!(page.contains("&lt;b&gt;"));
    }
}
