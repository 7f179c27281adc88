//! In-memory index implementation
//!
//! Backs unit tests and small replay runs where durability is not needed.
//! Semantics mirror the SQLite backend: explicit replace on re-indexing,
//! one position counter across the whole page.

use crate::content::Paragraph;
use crate::index::tokenize::tokenize;
use crate::index::{Index, IndexResult};
use std::collections::{HashMap, HashSet};

/// HashMap-backed term index
#[derive(Debug, Default)]
pub struct MemoryIndex {
    /// term -> url -> positions
    postings: HashMap<String, HashMap<String, Vec<usize>>>,
    /// URLs that have been indexed
    pages: HashSet<String>,
}

impl MemoryIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored positions of `term` within `url`, ascending
    pub fn positions(&self, term: &str, url: &str) -> Vec<usize> {
        self.postings
            .get(term)
            .and_then(|by_url| by_url.get(url))
            .cloned()
            .unwrap_or_default()
    }

    /// Counts indexed pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl Index for MemoryIndex {
    fn is_indexed(&self, url: &str) -> IndexResult<bool> {
        Ok(self.pages.contains(url))
    }

    fn index_page(&mut self, url: &str, paragraphs: &[Paragraph]) -> IndexResult<()> {
        // Explicit replace keeps re-indexing idempotent.
        for by_url in self.postings.values_mut() {
            by_url.remove(url);
        }
        self.postings.retain(|_, by_url| !by_url.is_empty());

        let mut position = 0usize;
        for paragraph in paragraphs {
            for term in tokenize(&paragraph.text()) {
                self.postings
                    .entry(term)
                    .or_default()
                    .entry(url.to_string())
                    .or_default()
                    .push(position);
                position += 1;
            }
        }

        self.pages.insert(url.to_string());
        Ok(())
    }

    fn get_counts(&self, term: &str) -> IndexResult<HashMap<String, usize>> {
        Ok(self
            .postings
            .get(term)
            .map(|by_url| {
                by_url
                    .iter()
                    .map(|(url, positions)| (url.clone(), positions.len()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
