use crate::crawler::CrawlMode;
use serde::Deserialize;

/// Main configuration structure for Wiki-Ripple
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub index: IndexConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Absolute URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Substring that marks a discovered link as internal
    #[serde(rename = "domain-marker")]
    pub domain_marker: String,

    /// Operating mode: `replay` or `live`
    pub mode: CrawlMode,

    /// Upper bound on crawl steps for one run
    #[serde(rename = "max-steps")]
    pub max_steps: u32,

    /// Stop once this many pages have been processed
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

/// Fetch layer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Directory holding recorded HTML snapshots
    #[serde(rename = "snapshot-dir")]
    pub snapshot_dir: String,

    /// CSS selector for paragraph-level content blocks
    #[serde(rename = "content-selector", default = "default_content_selector")]
    pub content_selector: String,

    /// Record live fetches into the snapshot store for later replay
    #[serde(rename = "record-snapshots", default)]
    pub record_snapshots: bool,
}

fn default_content_selector() -> String {
    "p".to_string()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Index configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}
