//! Article fetching over HTTP.
//!
//! [`ContentSource`] is the seam the service fetches through. The production
//! implementation, [`HttpFetcher`], owns a single `reqwest::Client` that every
//! batch task shares; connection pooling lives inside the client and nothing
//! else is mutable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::extract::extract_document_text;
use crate::parse::Document;
use crate::{PrecisError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Precis/0.1)".to_string() }
    }
}

/// Something that turns a URL into article text.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches `url` and returns its extracted plain text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages with a shared HTTP client and extracts paragraph text.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Builds the HTTP client once for the lifetime of the fetcher.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(PrecisError::HttpError)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Performs a GET request and returns the raw response body.
    ///
    /// Redirects are followed. Any status outside 2xx is an error.
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let parsed_url = parse_http_url(url)?;
        debug!(url = %parsed_url, "fetching article");

        let response = self
            .client
            .get(parsed_url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrecisError::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }

        response.text().await.map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> PrecisError {
        if err.is_timeout() { PrecisError::Timeout { timeout: self.config.timeout } } else { PrecisError::HttpError(err) }
    }
}

#[async_trait]
impl ContentSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let html = self.fetch_html(url).await?;
        let doc = Document::parse(&html);
        let text = extract_document_text(&doc)?;
        debug!(url, title = doc.title().as_deref(), chars = text.chars().count(), "extracted article text");
        Ok(text)
    }
}

/// Parses `url` and rejects anything that is not http or https.
pub fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| PrecisError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(PrecisError::InvalidUrl(format!("{url}: unsupported scheme {scheme}"))),
    }
}
