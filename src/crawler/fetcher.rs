//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with the configured timeout
//! - Sending GET requests with per-request headers
//! - Error classification (timeout vs. other transport failures)

use crate::PageError;
use reqwest::header::HeaderMap;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Maximum number of redirect hops followed for one request
pub const MAX_REDIRECTS: usize = 10;

/// A completed HTTP exchange
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Raw response body; empty unless the status is 200
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Returns true if the page should be parsed
    ///
    /// Only an exact 200 counts; other 2xx codes and redirects that were not
    /// followed are treated as non-success.
    pub fn is_ok(&self) -> bool {
        self.status_code == StatusCode::OK.as_u16()
    }
}

/// Builds an HTTP client with proper configuration
///
/// No default User-Agent is set on the client; each request carries its own.
///
/// # Example
///
/// ```no_run
/// use shop_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its status and body
///
/// # Request Flow
///
/// 1. Send GET with the given headers (redirects followed by the client)
/// 2. If the status is not 200, return without reading the body
/// 3. Otherwise read the full body as bytes
///
/// Any transport failure, including a body that cannot be read to the end,
/// is a `PageError`. A non-200 status is not an error.
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    headers: HeaderMap,
) -> Result<FetchedPage, PageError> {
    let response = client
        .get(url.as_str())
        .headers(headers)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();

    if status_code != StatusCode::OK.as_u16() {
        return Ok(FetchedPage {
            final_url,
            status_code,
            body: Vec::new(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        final_url,
        status_code,
        body: body.to_vec(),
    })
}

fn classify_error(url: &Url, error: reqwest::Error) -> PageError {
    if error.is_timeout() {
        PageError::Timeout {
            url: url.to_string(),
        }
    } else {
        PageError::Fetch {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_ok_reads_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/item"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&format!("{}/item", server.uri())).unwrap();
        let page = fetch_page(&client, &url, HeaderMap::new()).await.unwrap();

        assert!(page.is_ok());
        assert_eq!(page.body, b"<p>hi</p>");
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", "/new"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&format!("{}/old", server.uri())).unwrap();
        let page = fetch_page(&client, &url, HeaderMap::new()).await.unwrap();

        assert!(page.is_ok());
        assert_eq!(page.final_url, format!("{}/new", server.uri()));
        assert_eq!(page.body, b"moved");
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&format!("{}/gone", server.uri())).unwrap();
        let page = fetch_page(&client, &url, HeaderMap::new()).await.unwrap();

        assert!(!page.is_ok());
        assert_eq!(page.status_code, 404);
        assert!(page.body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_sends_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "TestAgent/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            "TestAgent/1.0".parse().unwrap(),
        );

        let page = fetch_page(&client, &url, headers).await.unwrap();
        assert!(page.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = build_http_client(Duration::from_millis(200)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let result = fetch_page(&client, &url, HeaderMap::new()).await;

        assert!(matches!(result, Err(PageError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener to get a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = build_http_client(Duration::from_secs(2)).unwrap();
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
        let result = fetch_page(&client, &url, HeaderMap::new()).await;

        assert!(matches!(result, Err(PageError::Fetch { .. })));
    }
}
