//! URL handling module for Shop-Harvest
//!
//! This module provides URL normalization, host comparison and the
//! non-content extension denylist used by link discovery.

mod domain;
mod filter;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_host};
pub use filter::{ExtensionDenylist, DEFAULT_DENIED_EXTENSIONS};
pub use normalize::{normalize_parsed, normalize_url};
