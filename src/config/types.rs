use serde::Deserialize;

/// Main configuration structure for Shop-Harvest
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub selectors: SelectorsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum link depth from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Base pause after each fetched page (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Upper bound of the random pause added to the base delay (milliseconds)
    #[serde(rename = "jitter-ms")]
    pub jitter_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            politeness_delay_ms: 1000,
            jitter_ms: 500,
            request_timeout_secs: 10,
        }
    }
}

/// Request header configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Pool of User-Agent strings; one is picked at random per request
    #[serde(rename = "user-agents")]
    pub user_agents: Vec<String>,

    /// Value of the Accept header
    pub accept: String,

    /// Value of the Accept-Language header
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

/// Desktop browser identities used when the config supplies none
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
];

/// Link discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Path extensions that mark a link as non-content (e.g. ".png")
    #[serde(rename = "denied-extensions")]
    pub denied_extensions: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            denied_extensions: crate::url::DEFAULT_DENIED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Selector ruleset location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorsConfig {
    /// Path to the JSON selector file
    pub path: String,
}

impl Default for SelectorsConfig {
    fn default() -> Self {
        Self {
            path: "config/selectors.json".to_string(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name prefix; a timestamp and extension are appended
    pub prefix: String,

    /// Export format name: "csv", "json" or "xlsx"
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "output".to_string(),
            format: "csv".to_string(),
        }
    }
}
