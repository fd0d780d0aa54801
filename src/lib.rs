//! Shop-Harvest: a polite single-domain product crawler
//!
//! This crate walks one web domain breadth-first from a seed URL, pulls
//! structured records out of each page with configurable CSS selector rules,
//! and keeps them in memory for export as CSV, JSON or a spreadsheet.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Shop-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse selector file: {0}")]
    Selectors(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Failure of a single page; always contained within one crawl step
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

/// Errors surfaced by the export operation
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export")]
    EmptyResult,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

/// Result type alias for Shop-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

// Re-export commonly used types
pub use config::{Config, SelectorRuleset};
pub use crawler::{CrawlEngine, StopHandle};
pub use output::{ExportFormat, ProgressObserver, Record, ResultSink};
pub use state::{CrawlState, RunStats};
