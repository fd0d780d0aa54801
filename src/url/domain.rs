use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shop_harvest::url::extract_domain;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if both URLs point at exactly the same host
///
/// Subdomains are distinct hosts: `shop.test` and `www.shop.test` do not
/// match. The scheme is ignored, so an `https` link from an `http` seed
/// stays on the host. Ports only count when written out; the parser drops a
/// scheme's default port, so `http://shop.test:80` has no port.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shop_harvest::url::same_host;
///
/// let seed = Url::parse("http://shop.test/").unwrap();
/// assert!(same_host(&seed, &Url::parse("http://shop.test/cart").unwrap()));
/// assert!(same_host(&seed, &Url::parse("https://shop.test/p/1").unwrap()));
/// assert!(!same_host(&seed, &Url::parse("http://cdn.shop.test/a").unwrap()));
/// ```
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(host_a), Some(host_b)) => {
            host_a == host_b && a.port() == b.port()
        }
        _ => false,
    }
}
