//! Output module for crawl results and progress reporting
//!
//! This module handles:
//! - The progress observer contract (status, data, done events)
//! - Extracted records and the in-memory result sink
//! - Exporting records as CSV, JSON or XLSX
//! - Printing end-of-run statistics

mod export;
mod record;
mod sink;
pub mod summary;
mod traits;

pub use export::{export_records, timestamped_path, write_records, ExportFormat, URL_COLUMN};
pub use record::{Record, NOT_FOUND};
pub use sink::ResultSink;
pub use summary::{format_run_summary, print_run_summary};
pub use traits::{ChannelObserver, CrawlEvent, ProgressObserver};
