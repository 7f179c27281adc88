//! The crawl controller
//!
//! Drives the crawl one step at a time: pop a URL from the frontier, fetch
//! its content, hand the content to the index, and queue the internal links
//! it contains. The operating mode selects between the deterministic replay
//! policy and the dedup-aware live policy.

use crate::content::Paragraph;
use crate::crawler::{CrawlMode, Frontier};
use crate::fetch::Fetcher;
use crate::index::Index;
use crate::url::LinkFilter;
use crate::Result;

/// Outcome of a single crawl step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The popped URL was fetched, indexed, and its internal links queued
    Processed(String),
    /// Live mode found the popped URL already indexed and dropped it
    /// without fetching, indexing, or extracting links
    Skipped(String),
}

/// Drives a breadth-first crawl from a seed URL
///
/// The controller owns the frontier and borrows nothing across steps: each
/// call to [`crawl_step`](Self::crawl_step) runs to completion before the
/// next begins. None of the state here is designed for concurrent access —
/// single-consumer use is a constraint of the design, not an oversight.
pub struct CrawlController<F, I> {
    /// Where the crawl started, immutable after construction
    source: String,
    /// URLs awaiting processing
    frontier: Frontier,
    /// Retrieves page content (snapshot or live path)
    fetcher: F,
    /// Receives page content; also answers dedup queries in live mode
    index: I,
    /// Decides which discovered links re-enter the frontier
    filter: LinkFilter,
}

impl<F: Fetcher, I: Index> CrawlController<F, I> {
    /// Creates a controller seeded with `source`
    ///
    /// The seed is pushed onto a fresh frontier. No fetch or index activity
    /// happens here.
    pub fn new(source: impl Into<String>, fetcher: F, index: I, filter: LinkFilter) -> Self {
        let source = source.into();
        let mut frontier = Frontier::new();
        frontier.push(source.clone());

        Self {
            source,
            frontier,
            fetcher,
            index,
            filter,
        }
    }

    /// Returns the seed URL
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the number of URLs awaiting processing
    ///
    /// Drivers check this before each step; `crawl_step` on an empty
    /// frontier is an error.
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the frontier for inspection
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns the index for queries
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Performs one crawl step and returns its outcome
    ///
    /// Pops one URL and applies the mode's policy:
    ///
    /// * [`CrawlMode::Replay`] fetches from the snapshot store and indexes
    ///   unconditionally, even when the URL is already indexed.
    /// * [`CrawlMode::Live`] first asks the index; an already-indexed URL is
    ///   dropped with [`StepOutcome::Skipped`] and triggers no fetch, no
    ///   index write, and no link extraction. Otherwise the URL is fetched
    ///   over the network, subject to the session fetch cache.
    ///
    /// Internal links are queued only after a successful index write, in
    /// document order of discovery, so a failed step mutates nothing beyond
    /// the initial pop. The popped URL is not requeued on failure.
    ///
    /// # Returns
    ///
    /// * `Ok(StepOutcome)` - The step completed
    /// * `Err(RippleError::EmptyFrontier)` - Called with nothing queued
    /// * `Err(RippleError::Fetch(_))` - Retrieval failed; the URL is lost
    /// * `Err(RippleError::Index(_))` - The index write failed
    pub async fn crawl_step(&mut self, mode: CrawlMode) -> Result<StepOutcome> {
        let url = self.frontier.pop()?;

        let paragraphs = match mode {
            CrawlMode::Replay => self.fetcher.fetch_cached(&url).await?,
            CrawlMode::Live => {
                if self.index.is_indexed(&url)? {
                    tracing::debug!("Skipping already indexed URL: {}", url);
                    return Ok(StepOutcome::Skipped(url));
                }
                self.fetcher.fetch_live(&url).await?
            }
        };

        self.index.index_page(&url, &paragraphs)?;
        self.queue_internal_links(&paragraphs);

        tracing::debug!(
            "Indexed {} ({} paragraphs, frontier now {})",
            url,
            paragraphs.len(),
            self.frontier.len()
        );

        Ok(StepOutcome::Processed(url))
    }

    /// Queues every internal link found in the content, in document order
    ///
    /// The push order determines future BFS traversal order, so it must
    /// follow left-to-right, top-to-bottom encounter order.
    fn queue_internal_links(&mut self, paragraphs: &[Paragraph]) {
        for paragraph in paragraphs {
            paragraph.for_each_link(&mut |target| {
                if self.filter.is_internal(target) {
                    self.frontier.push(target);
                }
            });
        }
    }
}
