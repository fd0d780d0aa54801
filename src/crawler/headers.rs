//! Per-request header policy
//!
//! Each request carries a User-Agent picked at random from a pool, plus
//! fixed `Accept` and `Accept-Language` values, so that consecutive requests
//! do not share an identical fingerprint.

use crate::config::{FetchConfig, DEFAULT_USER_AGENTS};
use fastrand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// Pool of identities and the fixed headers sent with every request
#[derive(Debug, Clone)]
pub struct RequestHeaders {
    user_agents: Vec<String>,
    accept: String,
    accept_language: String,
}

impl RequestHeaders {
    /// Creates a policy from the fetch configuration
    ///
    /// An empty pool falls back to the built-in browser identities.
    pub fn from_config(config: &FetchConfig) -> Self {
        let user_agents = if config.user_agents.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect()
        } else {
            config.user_agents.clone()
        };

        Self {
            user_agents,
            accept: config.accept.clone(),
            accept_language: config.accept_language.clone(),
        }
    }

    /// Picks one User-Agent from the pool
    pub fn pick_user_agent(&self, rng: &mut Rng) -> &str {
        &self.user_agents[rng.usize(..self.user_agents.len())]
    }

    /// Builds the header map for one request
    ///
    /// Values that cannot be sent as a header are skipped; configuration
    /// validation rejects them before a crawl starts.
    pub fn build(&self, rng: &mut Rng) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let pairs = [
            (USER_AGENT, self.pick_user_agent(rng)),
            (ACCEPT, self.accept.as_str()),
            (ACCEPT_LANGUAGE, self.accept_language.as_str()),
        ];

        for (name, value) in pairs {
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(_) => tracing::warn!("Skipping invalid {} header value", name),
            }
        }

        headers
    }
}
