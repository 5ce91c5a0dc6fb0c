//! Source resolution, fallback and caching for dataset loads.

use crate::cache::{LoadCache, SourceKey};
use cvd_owid::error::OwidError;
use cvd_owid::source::{client, DEFAULT_REMOTE_URL};
use cvd_owid::table::ObservationTable;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Local copy tried when the primary source cannot be read.
pub const DEFAULT_FALLBACK_PATH: &str = "data/owid-covid-data.csv";

/// Where datasets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Remote CSV used when no local path is given.
    pub remote_url: String,
    /// Local file tried once after a primary failure; `None` disables it.
    pub fallback_path: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            fallback_path: Some(PathBuf::from(DEFAULT_FALLBACK_PATH)),
        }
    }
}

/// A concrete place to read a dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Local(PathBuf),
    Remote(String),
}

impl DataSource {
    fn read(&self) -> Result<ObservationTable, OwidError> {
        match self {
            DataSource::Local(path) => ObservationTable::from_path(path),
            DataSource::Remote(url) => ObservationTable::from_url(&client()?, url),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Local(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Errors that abort a load. Both are fatal for the run.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither the primary source nor the fallback could be read.
    #[error("Dataset unavailable: could not read {primary_source} ({primary_error}); fallback: {fallback}")]
    DatasetUnavailable {
        primary_source: String,
        primary_error: String,
        fallback: String,
    },

    /// A source was read but its content is not a valid dataset.
    #[error("Dataset {source_name} is invalid: {error}")]
    Invalid {
        source_name: String,
        #[source]
        error: OwidError,
    },
}

/// Loads datasets according to a [`LoaderConfig`], memoising results.
#[derive(Debug)]
pub struct Loader {
    config: LoaderConfig,
    cache: Rc<LoadCache>,
}

impl Loader {
    /// A loader with its own empty cache.
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_cache(config, Rc::new(LoadCache::new()))
    }

    /// A loader sharing `cache` with other loaders.
    pub fn with_cache(config: LoaderConfig, cache: Rc<LoadCache>) -> Self {
        Self { config, cache }
    }

    pub fn cache(&self) -> &Rc<LoadCache> {
        &self.cache
    }

    /// Load the dataset at `source`, or the remote dataset when `None`.
    ///
    /// A cached table for the same argument is returned without touching
    /// the source. If the primary source cannot be read, or what it
    /// returns is not a dataset (no `location` or `date` header, such as
    /// an HTML page), the fallback path is tried once. A dataset with
    /// invalid content (one required column missing, bad dates or
    /// numbers) fails immediately.
    pub fn load(&self, source: Option<&Path>) -> Result<Rc<ObservationTable>, LoadError> {
        let key: SourceKey = source.map(Path::to_path_buf);
        if let Some(hit) = self.cache.get(&key) {
            debug!("Cache hit for {:?}", key);
            return Ok(hit);
        }

        let primary = match source {
            Some(path) => DataSource::Local(path.to_path_buf()),
            None => DataSource::Remote(self.config.remote_url.clone()),
        };

        let table = match primary.read() {
            Ok(table) => table,
            Err(e) if e.is_read_failure() => {
                warn!("Failed to read {}: {}", primary, e);
                self.load_fallback(&primary, e)?
            }
            Err(e) => {
                return Err(LoadError::Invalid {
                    source_name: primary.to_string(),
                    error: e,
                })
            }
        };

        info!(
            "Loaded {} observations, {} locations",
            table.len(),
            table.locations().len()
        );
        Ok(self.cache.insert(key, table))
    }

    fn load_fallback(
        &self,
        primary: &DataSource,
        primary_error: OwidError,
    ) -> Result<ObservationTable, LoadError> {
        let unavailable = |fallback: String| LoadError::DatasetUnavailable {
            primary_source: primary.to_string(),
            primary_error: primary_error.to_string(),
            fallback,
        };

        let Some(path) = self.config.fallback_path.as_ref() else {
            return Err(unavailable("disabled".to_string()));
        };
        let fallback = DataSource::Local(path.clone());
        if fallback == *primary {
            return Err(unavailable(format!("{} is the primary source", fallback)));
        }

        info!("Trying fallback dataset {}", fallback);
        match fallback.read() {
            Ok(table) => Ok(table),
            Err(e) if e.is_read_failure() => {
                Err(unavailable(format!("could not read {} ({})", fallback, e)))
            }
            Err(e) => Err(LoadError::Invalid {
                source_name: fallback.to_string(),
                error: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    const CSV: &str = "location,date,total_cases\nA,2021-01-01,10\nA,2021-01-02,20\nB,2021-01-01,5\n";

    fn config(fallback: Option<PathBuf>) -> LoaderConfig {
        LoaderConfig {
            // Nothing listens on the discard port, so the request fails fast.
            remote_url: "http://127.0.0.1:9/owid-covid-data.csv".to_string(),
            fallback_path: fallback,
        }
    }

    /// Answer a single request on a loopback port; returns the URL to fetch.
    fn serve_once(status: &str, content_type: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/datasets/owid")
    }

    fn remote_config(remote_url: String, fallback: Option<PathBuf>) -> LoaderConfig {
        LoaderConfig {
            remote_url,
            fallback_path: fallback,
        }
    }

    fn fallback_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("fallback.csv");
        fs::write(&path, "location,date,total_cases\nZ,2020-06-01,1\n").unwrap();
        path
    }

    #[test]
    fn loads_remote_primary() {
        let url = serve_once("200 OK", "text/csv", CSV);
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(remote_config(url, Some(fallback_file(&dir))));
        let table = loader.load(None).unwrap();
        assert_eq!(table.locations(), vec!["A", "B"]);
    }

    #[test]
    fn web_page_primary_uses_fallback() {
        let url = serve_once(
            "200 OK",
            "text/html",
            "<!DOCTYPE html>\n<html lang=\"en\">\n<body><p>Cases, deaths</p></body>\n</html>\n",
        );
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(remote_config(url, Some(fallback_file(&dir))));
        let table = loader.load(None).unwrap();
        assert_eq!(table.locations(), vec!["Z"]);
    }

    #[test]
    fn not_found_primary_uses_fallback() {
        let url = serve_once("404 Not Found", "text/plain", "missing");
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(remote_config(url, Some(fallback_file(&dir))));
        let table = loader.load(None).unwrap();
        assert_eq!(table.locations(), vec!["Z"]);
    }

    #[test]
    fn empty_primary_body_uses_fallback() {
        let url = serve_once("200 OK", "text/csv", "");
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(remote_config(url, Some(fallback_file(&dir))));
        let table = loader.load(None).unwrap();
        assert_eq!(table.locations(), vec!["Z"]);
    }

    #[test]
    fn web_page_without_fallback_is_dataset_unavailable() {
        let url = serve_once("200 OK", "text/html", "<html><body>hello</body></html>\n");
        let loader = Loader::new(remote_config(url, None));
        let err = loader.load(None).unwrap_err();
        match err {
            LoadError::DatasetUnavailable { primary_error, .. } => {
                assert!(primary_error.contains("not a dataset"), "{primary_error}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn one_missing_column_is_invalid_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("no-date.csv");
        fs::write(&primary, "location,total_cases\nA,1\n").unwrap();
        let loader = Loader::new(config(Some(fallback_file(&dir))));
        let err = loader.load(Some(&primary)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                error: OwidError::MissingColumn("date"),
                ..
            }
        ));
    }

    #[test]
    fn loads_local_primary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owid.csv");
        fs::write(&path, CSV).unwrap();

        let loader = Loader::new(config(None));
        let table = loader.load(Some(&path)).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.locations(), vec!["A", "B"]);
    }

    #[test]
    fn repeated_loads_hit_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owid.csv");
        fs::write(&path, CSV).unwrap();

        let loader = Loader::new(config(None));
        let first = loader.load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        let second = loader.load(Some(&path)).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(loader.cache().len(), 1);
    }

    #[test]
    fn injected_cache_is_shared_between_loaders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("owid.csv");
        fs::write(&path, CSV).unwrap();

        let cache = Rc::new(LoadCache::new());
        let first = Loader::with_cache(config(None), Rc::clone(&cache));
        let second = Loader::with_cache(config(None), Rc::clone(&cache));
        let a = first.load(Some(&path)).unwrap();
        let b = second.load(Some(&path)).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn unreadable_primary_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("fallback.csv");
        fs::write(&fallback, CSV).unwrap();

        let loader = Loader::new(config(Some(fallback)));
        let table = loader.load(Some(&dir.path().join("missing.csv"))).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn unreachable_remote_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("fallback.csv");
        fs::write(&fallback, CSV).unwrap();

        let loader = Loader::new(config(Some(fallback)));
        let table = loader.load(None).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn both_sources_failing_is_dataset_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(config(Some(dir.path().join("also-missing.csv"))));
        let err = loader.load(Some(&dir.path().join("missing.csv"))).unwrap_err();
        assert!(matches!(err, LoadError::DatasetUnavailable { .. }));
        assert!(err.to_string().starts_with("Dataset unavailable"));
        assert!(loader.cache().is_empty(), "failures are not cached");
    }

    #[test]
    fn disabled_fallback_is_dataset_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new(config(None));
        let err = loader.load(Some(&dir.path().join("missing.csv"))).unwrap_err();
        match err {
            LoadError::DatasetUnavailable { fallback, .. } => assert_eq!(fallback, "disabled"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_date_is_fatal_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("bad.csv");
        fs::write(&primary, "location,date\nA,someday\n").unwrap();
        let fallback = dir.path().join("fallback.csv");
        fs::write(&fallback, CSV).unwrap();

        let loader = Loader::new(config(Some(fallback)));
        let err = loader.load(Some(&primary)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid {
                error: OwidError::InvalidDate { .. },
                ..
            }
        ));
    }
}
