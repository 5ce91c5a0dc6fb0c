//! Command implementations for the COVID-19 dashboard CLI.
//!
//! Every command loads the dataset through [`cvd_data::loader::Loader`]
//! using the shared [`SourceArgs`], then renders or prints from it.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use cvd_data::loader::{Loader, LoaderConfig, DEFAULT_FALLBACK_PATH};
use cvd_owid::export::EXPORT_FILE_NAME;
use cvd_owid::source::DEFAULT_REMOTE_URL;
use cvd_owid::table::ObservationTable;
use std::path::PathBuf;
use std::rc::Rc;

pub mod dashboard;
pub mod export;
pub mod inspect;

/// Where to read the dataset from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Local CSV to read instead of the remote dataset
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Remote CSV used when no --source is given
    #[arg(long, default_value = DEFAULT_REMOTE_URL)]
    pub url: String,

    /// Local copy tried once when the primary source cannot be read
    #[arg(long, default_value = DEFAULT_FALLBACK_PATH)]
    pub fallback: PathBuf,

    /// Fail instead of trying the fallback copy
    #[arg(long)]
    pub no_fallback: bool,
}

impl SourceArgs {
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            remote_url: self.url.clone(),
            fallback_path: (!self.no_fallback).then(|| self.fallback.clone()),
        }
    }

    /// Load the dataset; failures of both sources are fatal.
    pub fn load(&self) -> anyhow::Result<Rc<ObservationTable>> {
        let loader = Loader::new(self.loader_config());
        Ok(loader.load(self.source.as_deref())?)
    }
}

/// Locations and dates to narrow the dataset to.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Location to include; repeat for several (default: India, United States, Brazil)
    #[arg(short = 'l', long = "location")]
    pub locations: Vec<String>,

    /// First date to include, YYYY-MM-DD (default: earliest in the data)
    #[arg(long, value_parser = cvd_utils::dates::parse_date)]
    pub start: Option<NaiveDate>,

    /// Last date to include, YYYY-MM-DD (default: latest in the data)
    #[arg(long, value_parser = cvd_utils::dates::parse_date)]
    pub end: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the HTML dashboard with its charts, insights and CSV export
    Dashboard {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Directory receiving index.html and the other artifacts
        #[arg(long, default_value = "dashboard")]
        out_dir: PathBuf,

        /// Number of locations in the top cases chart
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Print the locations with the most total cases
    Top {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of locations to print
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Print the latest statistics of the selected locations
    Latest {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Write the cleaned dataset as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output CSV path
        #[arg(short = 'o', long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Dashboard {
            source,
            selection,
            out_dir,
            top,
        } => dashboard::run_dashboard(&source, &selection, &out_dir, top),
        Command::Top { source, top } => inspect::run_top(&source, top),
        Command::Latest { source, selection } => inspect::run_latest(&source, &selection),
        Command::Export { source, output } => export::run_export(&source, &output),
    }
}
