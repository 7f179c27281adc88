//! HTTP fetcher implementation
//!
//! This module handles page retrieval for the crawler, including:
//! - Building the HTTP client with a proper user agent string
//! - The live fetch path with its session cache
//! - The deterministic snapshot path used by replay mode
//! - Optional recording of live fetches into the snapshot store

use crate::config::{FetchConfig, UserAgentConfig};
use crate::content::{parse_paragraphs, Paragraph};
use crate::fetch::{FetchError, FetchResult, Fetcher, SnapshotStore};
use crate::ConfigError;
use reqwest::Client;
use scraper::Selector;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher: live HTTP with a session cache, plus the snapshot
/// store backing replay mode
///
/// The session cache guarantees a URL is fetched from the network at most
/// once per crawl session; the snapshot store holds recorded HTML for
/// deterministic replay runs.
pub struct WikiFetcher {
    client: Client,
    session_cache: HashMap<String, Vec<Paragraph>>,
    snapshots: SnapshotStore,
    paragraph_selector: Selector,
    record_snapshots: bool,
}

impl WikiFetcher {
    /// Creates a fetcher from configuration
    ///
    /// # Arguments
    ///
    /// * `fetch` - Snapshot directory, content selector, recording flag
    /// * `user_agent` - Identification for the HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(WikiFetcher)` - Ready to fetch
    /// * `Err(RippleError)` - Invalid content selector or client build failure
    pub fn new(fetch: &FetchConfig, user_agent: &UserAgentConfig) -> crate::Result<Self> {
        let paragraph_selector = Selector::parse(&fetch.content_selector).map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid content-selector '{}': {}",
                fetch.content_selector, e
            ))
        })?;

        let client = build_http_client(user_agent)?;

        Ok(Self {
            client,
            session_cache: HashMap::new(),
            snapshots: SnapshotStore::new(fetch.snapshot_dir.clone()),
            paragraph_selector,
            record_snapshots: fetch.record_snapshots,
        })
    }

    /// Returns the snapshot store backing the cached path
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Number of URLs held in the session cache
    pub fn session_cache_len(&self) -> usize {
        self.session_cache.len()
    }

    /// Performs the actual network retrieval for one URL
    async fn fetch_over_network(&self, url: &str, base: &Url) -> FetchResult<(String, Vec<Paragraph>)> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // A missing header is tolerated; a declared non-HTML type is not.
        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        let paragraphs = parse_paragraphs(&body, base, &self.paragraph_selector);
        Ok((body, paragraphs))
    }
}

impl Fetcher for WikiFetcher {
    async fn fetch_cached(&mut self, url: &str) -> FetchResult<Vec<Paragraph>> {
        let base = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = self.snapshots.load(url)?;
        Ok(parse_paragraphs(&html, &base, &self.paragraph_selector))
    }

    async fn fetch_live(&mut self, url: &str) -> FetchResult<Vec<Paragraph>> {
        if let Some(cached) = self.session_cache.get(url) {
            tracing::trace!("Session cache hit for {}", url);
            return Ok(cached.clone());
        }

        let base = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!("Fetching {}", url);
        let (body, paragraphs) = self.fetch_over_network(url, &base).await?;

        if self.record_snapshots {
            self.snapshots.store(url, &body)?;
        }

        self.session_cache
            .insert(url.to_string(), paragraphs.clone());

        Ok(paragraphs)
    }
}
