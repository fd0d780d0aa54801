//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Idle / Running / Stopped lifecycle of a run
//! - `Frontier`: breadth-first queue and the run-wide visited set
//! - `RunStats`: scanned / found / error counters

mod crawl_state;
mod frontier;
mod stats;

// Re-export main types
pub use crawl_state::{CrawlState, SharedCrawlState};
pub use frontier::{Frontier, FrontierEntry};
pub use stats::RunStats;
