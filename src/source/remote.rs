//! Workbooks published over HTTP(S)

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use super::{CsvSource, GridSource, WorkbookSource};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Grid;

/// A downloaded workbook or CSV export
pub struct RemoteSource {
    url: String,
    inner: Box<dyn GridSource>,
}

impl RemoteSource {
    /// Download `url` once and keep its contents in memory
    pub fn fetch(url: &str, settings: &Settings) -> LedgerResult<Self> {
        let (bytes, content_type) = download(url, settings.fetch_timeout_secs)?;

        let inner: Box<dyn GridSource> = if is_csv(url, content_type.as_deref()) {
            Box::new(CsvSource::from_reader(
                url,
                "sheet",
                bytes.as_slice(),
                settings.csv_delimiter,
            )?)
        } else {
            Box::new(WorkbookSource::from_bytes(url, bytes)?)
        };

        Ok(Self {
            url: url.to_string(),
            inner,
        })
    }
}

impl GridSource for RemoteSource {
    fn describe(&self) -> &str {
        &self.url
    }

    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn fetch_sheet(&self, name: Option<&str>) -> LedgerResult<Grid> {
        self.inner.fetch_sheet(name)
    }
}

fn download(url: &str, timeout_secs: u64) -> LedgerResult<(Vec<u8>, Option<String>)> {
    info!(url, timeout_secs, "downloading spreadsheet");

    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LedgerError::source_unavailable(url, e))?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| LedgerError::source_unavailable(url, e))?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = response
        .bytes()
        .map_err(|e| LedgerError::source_unavailable(url, e))?;
    debug!(url, len = bytes.len(), ?content_type, "download complete");

    Ok((bytes.to_vec(), content_type))
}

/// Whether a download should be read as CSV rather than as a workbook
fn is_csv(url: &str, content_type: Option<&str>) -> bool {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .to_ascii_lowercase();
    let query = url.to_ascii_lowercase();

    path.ends_with(".csv")
        || query.contains("format=csv")
        || query.contains("output=csv")
        || content_type.is_some_and(|ct| ct.to_ascii_lowercase().starts_with("text/csv"))
}
