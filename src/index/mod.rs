//! Full-text term index for Wiki-Ripple
//!
//! The crawl controller forwards each fetched page here. The index stores
//! term positions per URL, answers "has this URL been indexed?" for the
//! live-mode dedup check, and serves occurrence counts to downstream
//! consumers.

mod memory;
mod schema;
mod sqlite;
mod tokenize;

pub use memory::MemoryIndex;
pub use sqlite::SqliteIndex;
pub use tokenize::tokenize;

use crate::content::Paragraph;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for index operations
pub type IndexResult<T> = std::result::Result<T, IndexError>;

/// Search index consumed by the crawl controller
///
/// Implementations must make `index_page` idempotent: indexing the same URL
/// twice yields the same observable state as indexing it once.
pub trait Index {
    /// Returns whether `url` has already been indexed
    fn is_indexed(&self, url: &str) -> IndexResult<bool>;

    /// Records term positions for `url`, replacing any prior entry
    ///
    /// Terms are tokenized from the paragraphs' text in document order and
    /// positioned by a single counter running across the whole page.
    fn index_page(&mut self, url: &str, paragraphs: &[Paragraph]) -> IndexResult<()>;

    /// Returns occurrence counts of `term` keyed by URL
    ///
    /// URLs that never contained the term are absent from the map.
    fn get_counts(&self, term: &str) -> IndexResult<HashMap<String, usize>>;
}
