//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with rotating request headers
//! - HTML parsing and same-host link discovery
//! - Selector-based record extraction
//! - Politeness delays between requests
//! - Overall crawl orchestration

mod engine;
mod extractor;
mod fetcher;
mod headers;
mod parser;
mod politeness;

pub use engine::{CrawlEngine, StepOutcome, StopHandle};
pub use extractor::Extractor;
pub use fetcher::{build_http_client, fetch_page, FetchedPage, MAX_REDIRECTS};
pub use headers::RequestHeaders;
pub use parser::{discover_links, parse_document, resolve_link};
pub use politeness::Politeness;
