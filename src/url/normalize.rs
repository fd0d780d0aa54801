use crate::UrlError;
use url::Url;

/// Normalizes a URL string into the form stored in the visited set
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Require an HTTP or HTTPS scheme
/// 3. Require a host
/// 4. Remove fragment (everything after #)
///
/// Host case and an empty path are normalized by the parser itself
/// (`HTTP://Shop.TEST` becomes `http://shop.test/`). Query strings and
/// trailing slashes are kept as written since shops commonly route on them.
///
/// # Examples
///
/// ```
/// use shop_harvest::url::normalize_url;
///
/// let url = normalize_url("http://SHOP.test/item?id=3#reviews").unwrap();
/// assert_eq!(url.as_str(), "http://shop.test/item?id=3");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(url)
}

/// Applies the same normalization to an already parsed URL
pub fn normalize_parsed(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    Ok(url)
}
