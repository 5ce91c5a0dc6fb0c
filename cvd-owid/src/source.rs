//! Remote dataset fetching.

use crate::error::{OwidError, Result};
use crate::table::ObservationTable;
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

/// Raw CSV endpoint of the OWID COVID-19 dataset.
pub const DEFAULT_REMOTE_URL: &str = "https://covid.ourworldindata.org/data/owid-covid-data.csv";

/// Request timeout for the dataset download.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Download the body of `url` as text.
///
/// A non-200 status or an empty body is an error; there are no retries.
pub fn fetch_csv(client: &Client, url: &str) -> Result<String> {
    info!("Fetching dataset from {}", url);
    let response = client.get(url).send()?;
    if response.status() != StatusCode::OK {
        warn!("Bad response status for {}: {}", url, response.status());
        return Err(OwidError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let body = response.text()?;
    if body.trim().is_empty() {
        warn!("Empty response for {}", url);
        return Err(OwidError::EmptyResponse(url.to_string()));
    }
    info!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}

/// Build a blocking client with [`REQUEST_TIMEOUT`].
pub fn client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

impl ObservationTable {
    /// Download and parse the dataset at `url`.
    pub fn from_url(client: &Client, url: &str) -> Result<Self> {
        let body = fetch_csv(client, url)?;
        Self::from_csv_str(&body)
    }
}
