//! HTTP client for pagination fragments and media files.

use reqwest::{header, Client, Response, StatusCode};

use crate::config::{Config, Profile};
use crate::error::{Error, Result};

/// Result of requesting one pagination page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    /// Successful response with a non-empty body.
    Fragment(String),
    /// Successful response whose body is empty or whitespace.
    Empty,
    /// Non-success HTTP status.
    Status(u16),
}

/// HTTP client shared by the paginator and the downloader.
#[derive(Debug, Clone)]
pub struct FapelloClient {
    client: Client,
    endpoint: String,
}

impl FapelloClient {
    /// Build a client from configuration.
    ///
    /// Certificate validation is always on.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.options.user_agent)
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config
                .options
                .pagination_endpoint
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// URL of pagination page `page` for `profile`.
    pub fn page_url(&self, profile: &Profile, page: u32) -> String {
        format!("{}/{}/page-{}/", self.endpoint, profile, page)
    }

    /// Request one pagination page.
    pub async fn fetch_page(&self, profile: &Profile, page: u32) -> Result<PageFetch> {
        let url = self.page_url(profile, page);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Ok(PageFetch::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            Ok(PageFetch::Empty)
        } else {
            Ok(PageFetch::Fragment(body))
        }
    }

    /// Start downloading a file, failing on non-success status.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "*/*")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!("HTTP {}", status_text(status))));
        }

        Ok(response)
    }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
