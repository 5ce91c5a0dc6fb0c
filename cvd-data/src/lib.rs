//! Loading the COVID-19 dataset.
//!
//! [`loader::Loader`] reads the primary source (a local file or the
//! remote CSV endpoint), falls back to a configured local copy once, and
//! memoises successful loads in an injectable [`cache::LoadCache`].

pub mod cache;
pub mod loader;
