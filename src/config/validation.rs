use crate::config::types::{Config, CrawlerConfig, FetchConfig, LinksConfig, OutputConfig};
use crate::output::ExportFormat;
use crate::ConfigError;
use reqwest::header::HeaderValue;

/// Upper bound for a single request timeout
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_links_config(&config.links)?;
    validate_output_config(&config.output)?;

    if config.selectors.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "selectors path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.request_timeout_secs < 1 || config.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and {}, got {}",
            MAX_REQUEST_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates request header configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents must contain at least one entry".to_string(),
        ));
    }

    for agent in &config.user_agents {
        validate_header_value("user agent", agent)?;
    }
    validate_header_value("accept", &config.accept)?;
    validate_header_value("accept_language", &config.accept_language)?;

    Ok(())
}

/// Header values must be non-empty and transmittable as-is
fn validate_header_value(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    if HeaderValue::from_str(value).is_err() {
        return Err(ConfigError::Validation(format!(
            "{} contains characters not allowed in an HTTP header: '{}'",
            name, value
        )));
    }

    Ok(())
}

/// Validates the extension denylist
fn validate_links_config(config: &LinksConfig) -> Result<(), ConfigError> {
    for ext in &config.denied_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "denied extension must look like '.png', got '{}'",
                ext
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.prefix.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output prefix cannot be empty".to_string(),
        ));
    }

    config
        .format
        .parse::<ExportFormat>()
        .map_err(|e| ConfigError::Validation(e.to_string()))?;

    Ok(())
}
