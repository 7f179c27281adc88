//! Wiki-Ripple: a breadth-first wiki crawler and term indexer
//!
//! This crate implements a crawler that walks a wiki-style encyclopedia
//! breadth-first from a seed page, hands each page's paragraph content to a
//! full-text term index, and follows internal links until told to stop.

pub mod config;
pub mod content;
pub mod crawler;
pub mod fetch;
pub mod index;
pub mod url;

use thiserror::Error;

/// Main error type for Wiki-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Popping from an empty frontier is a caller protocol violation;
    /// drivers check the frontier size before each step.
    #[error("Frontier is empty")]
    EmptyFrontier,

    #[error("Fetch failed: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Index write failed: {0}")]
    Index(#[from] index::IndexError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wiki-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{ContentNode, Paragraph};
pub use crawler::{CrawlController, CrawlMode, Frontier, StepOutcome};
pub use fetch::{Fetcher, WikiFetcher};
pub use index::{Index, MemoryIndex, SqliteIndex};
pub use url::LinkFilter;
