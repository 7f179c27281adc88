/// Splits text into lowercase index terms
///
/// A term is a maximal run of alphanumeric characters; everything else is a
/// separator. Terms are lowercased so queries are case-insensitive.
///
/// # Examples
///
/// ```
/// use wiki_ripple::index::tokenize;
///
/// assert_eq!(tokenize("The quick-brown fox!"), vec!["the", "quick", "brown", "fox"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(|term| term.to_lowercase())
        .collect()
}
