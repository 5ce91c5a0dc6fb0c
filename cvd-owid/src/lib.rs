//! Core types for OWID-style COVID-19 datasets.
//!
//! One [`Observation`](observation::Observation) per (location, date) row,
//! held in an [`ObservationTable`](table::ObservationTable) together with
//! the [`ColumnSet`](column::ColumnSet) of metrics the source provided.

pub mod column;
pub mod date_range;
pub mod error;
pub mod export;
pub mod observation;
#[cfg(feature = "api")]
pub mod source;
pub mod table;
