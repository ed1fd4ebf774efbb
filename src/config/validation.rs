//! Configuration and input validation logic.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// A profile identifier: the single path segment of a profile base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile(String);

impl Profile {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn base_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https://[^/\s?#]+/([^/\s?#]+)/$").expect("base URL pattern is valid")
    })
}

/// Check that `input` has the exact shape `https://<host>/<profile>/`.
pub fn validate_base_url(input: &str) -> bool {
    parse_profile(input).is_ok()
}

/// Extract the profile identifier from a base URL.
pub fn parse_profile(input: &str) -> Result<Profile> {
    let invalid_url = || Error::InvalidBaseUrl(input.to_string());

    let captures = base_url_pattern().captures(input).ok_or_else(invalid_url)?;
    let segment = &captures[1];

    // "." and ".." (plain or percent-encoded) collapse away once the URL is normalized
    if is_dot_segment(segment) {
        return Err(invalid_url());
    }

    // Reject hosts the URL parser does not accept (e.g. "https://:80/x/")
    Url::parse(input).map_err(|_| invalid_url())?;

    Ok(Profile(segment.to_string()))
}

fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let options = &config.options;

    if options.batch_size == 0 {
        return Err(invalid("batch_size", "must be at least 1"));
    }

    if options.navigation_timeout_secs == 0 {
        return Err(invalid("navigation_timeout_secs", "must be at least 1"));
    }

    if options.max_pages == 0 {
        return Err(invalid("max_pages", "must be at least 1"));
    }

    let [min, max] = options.page_delay_ms;
    if min > max {
        return Err(invalid(
            "page_delay_ms",
            &format!("minimum ({}) exceeds maximum ({})", min, max),
        ));
    }

    validate_endpoint(&options.pagination_endpoint)?;

    if options.user_agent.trim().is_empty() {
        return Err(invalid("user_agent", "must not be empty"));
    }

    Ok(())
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| invalid("pagination_endpoint", &e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(
            "pagination_endpoint",
            &format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> Error {
    Error::ConfigValidation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
