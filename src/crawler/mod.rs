//! Crawl control for Wiki-Ripple
//!
//! This module contains the crawl core:
//! - The FIFO frontier of URLs awaiting processing
//! - The controller that drives one crawl step at a time
//! - The operating mode that selects the replay or live policy

mod controller;
mod frontier;

pub use controller::{CrawlController, StepOutcome};
pub use frontier::Frontier;

use serde::Deserialize;

/// Operating mode for a crawl step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlMode {
    /// Deterministic mode: fetch from the snapshot store, re-index
    /// unconditionally
    Replay,
    /// Network mode: skip already-indexed URLs, fetch through the session
    /// cache
    Live,
}
