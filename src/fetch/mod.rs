//! Page retrieval for Wiki-Ripple
//!
//! This module contains the two fetch paths the controller relies on:
//! - A deterministic snapshot path used by replay mode (never touches the
//!   network)
//! - A live HTTP path used by live mode, backed by a session cache so a URL
//!   is fetched from the network at most once per crawl session

mod http;
mod snapshot;

pub use http::{build_http_client, WikiFetcher};
pub use snapshot::SnapshotStore;

use crate::content::Paragraph;
use thiserror::Error;

/// Errors that can occur during page retrieval
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected text/html for {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Not an absolute URL: {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("No snapshot recorded for {url}")]
    MissingSnapshot { url: String },

    #[error("Snapshot IO error for {url}: {source}")]
    Io {
        url: String,
        source: std::io::Error,
    },
}

/// Result type for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Retrieves a page's paragraph content
///
/// Injected into the crawl controller at construction; the controller picks
/// the path according to its operating mode.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Deterministic path: serves the page from previously recorded
    /// content and never performs network I/O. The same URL yields the
    /// same content within a run.
    async fn fetch_cached(&mut self, url: &str) -> FetchResult<Vec<Paragraph>>;

    /// Network path: fetches the page over HTTP unless it was already
    /// fetched earlier in this session, in which case the cached result is
    /// returned.
    async fn fetch_live(&mut self, url: &str) -> FetchResult<Vec<Paragraph>>;
}
