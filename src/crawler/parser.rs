//! HTML parsing and link discovery
//!
//! This module handles turning a fetched body into a document and finding
//! the links worth following from it:
//! - Decoding the body (invalid UTF-8 is replaced, binary content rejected)
//! - Resolving `<a href>` targets against the page URL
//! - Keeping only same-host, non-denied, http(s) links

use crate::url::{normalize_parsed, same_host, ExtensionDenylist};
use crate::PageError;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Parses a response body into an HTML document
///
/// The HTML parser itself is lenient, so the only rejected input is a body
/// that is clearly not text (it contains NUL bytes).
///
/// # Example
///
/// ```
/// use shop_harvest::crawler::parse_document;
/// use url::Url;
///
/// let url = Url::parse("http://shop.test/").unwrap();
/// assert!(parse_document(&url, b"<html><body>ok</body></html>").is_ok());
/// assert!(parse_document(&url, b"\x89PNG\r\n\x1a\n\0\0\0").is_err());
/// ```
pub fn parse_document(url: &Url, body: &[u8]) -> Result<Html, PageError> {
    if body.contains(&0) {
        return Err(PageError::Parse {
            url: url.to_string(),
            message: "response body is not text".to_string(),
        });
    }

    let text = String::from_utf8_lossy(body);
    Ok(Html::parse_document(&text))
}

/// Finds the links on a page that belong in the frontier
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` targets, resolved against `page_url`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only links (same page anchors)
/// - Non-HTTP(S) URLs after resolution
/// - URLs on a different host than `seed`
/// - URLs whose path ends with a denied extension
///
/// Results are normalized, de-duplicated and kept in document order.
pub fn discover_links(
    document: &Html,
    page_url: &Url,
    seed: &Url,
    denylist: &ExtensionDenylist,
) -> Vec<Url> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_link(href, page_url) else {
            continue;
        };

        if !same_host(&url, seed) {
            tracing::trace!("Skipping off-host link {}", url);
            continue;
        }

        if denylist.is_denied(&url) {
            tracing::trace!("Skipping denied link {}", url);
            continue;
        }

        if seen.insert(url.as_str().to_string()) {
            links.push(url);
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only hrefs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_parsed(absolute).ok()
}
