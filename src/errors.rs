//! Error types shared by the scraping pipelines

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Request to {url} failed with HTTP {status}")]
    FetchStatus {
        url: String,
        status: u16,
    },

    #[error("No raw data at {0}. Fetch the stock before parsing it offline")]
    MissingRawData(PathBuf),

    #[error("Row '{label}' has {found} values but the table has {expected} periods")]
    MalformedRow {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("No price pages to extract")]
    NoPages,

    #[error("Invalid CSS selector '{css}': {message}")]
    Selector {
        css: String,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
