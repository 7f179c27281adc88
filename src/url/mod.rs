//! URL handling module for Wiki-Ripple
//!
//! This module decides which discovered links belong to the crawlable
//! content domain and are therefore eligible for the frontier.

mod filter;

// Re-export main types
pub use filter::LinkFilter;
