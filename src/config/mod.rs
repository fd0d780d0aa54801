//! Configuration module for Shop-Harvest
//!
//! This module handles loading, parsing, and validating the TOML run
//! configuration and the JSON selector ruleset.
//!
//! # Example
//!
//! ```no_run
//! use shop_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod selectors;
mod types;
mod validation;

// Re-export types
pub use selectors::SelectorRuleset;
pub use types::{
    Config, CrawlerConfig, FetchConfig, LinksConfig, OutputConfig, SelectorsConfig,
    DEFAULT_USER_AGENTS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
