//! Presentation of COVID-19 aggregates.
//!
//! This crate provides:
//! - `surface`: the [`DisplaySurface`](surface::DisplaySurface) trait every output target implements
//! - `html`: a surface that writes a self-contained HTML dashboard plus its artifacts
//! - `static_charts`: SVG bar and line charts rendered with plotters
//! - `interactive`: ECharts option documents for the per-location trend charts
//! - `summary`: the insights text and terminal tables
//! - `state`: the active location/date selection
//! - `dashboard`: the full presentation flow over a surface
//! - `components`: reusable HTML fragments (controls, table, chart containers)

pub mod components;
pub mod dashboard;
pub mod html;
pub mod interactive;
pub mod state;
pub mod static_charts;
pub mod summary;
pub mod surface;
