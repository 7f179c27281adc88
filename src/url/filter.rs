/// Decides whether a discovered link is internal to the content domain
///
/// A link counts as internal when its string contains the configured domain
/// marker anywhere — path and query segments included. This is containment,
/// not hostname equality, so false positives are accepted; tightening it
/// would change which pages the crawl reaches.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    marker: String,
}

impl LinkFilter {
    /// Creates a filter for the given domain marker
    ///
    /// # Arguments
    ///
    /// * `marker` - Substring identifying the content domain
    ///   (e.g. `"wikipedia"` or `"wiki.example"`)
    ///
    /// # Examples
    ///
    /// ```
    /// use wiki_ripple::url::LinkFilter;
    ///
    /// let filter = LinkFilter::new("wikipedia");
    /// assert!(filter.is_internal("https://en.wikipedia.org/wiki/Rust"));
    /// assert!(!filter.is_internal("https://example.com/page"));
    /// ```
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Returns true if the candidate URL belongs to the content domain
    ///
    /// Pure predicate, no side effects.
    pub fn is_internal(&self, url: &str) -> bool {
        url.contains(&self.marker)
    }
}
