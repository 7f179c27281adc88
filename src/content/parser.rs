//! HTML parser producing paragraph content trees
//!
//! This module converts raw HTML into the crate's paragraph/node model:
//! - Paragraph-level blocks are selected with a configurable CSS selector
//! - `<a href>` elements become `Link` nodes with absolute targets
//! - Every other element is kept only for its children

use crate::content::{ContentNode, Paragraph};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Parses HTML into paragraph content trees
///
/// Each element matched by `paragraph_selector` becomes one [`Paragraph`],
/// in document order. Hrefs are resolved against `base_url`; hrefs that
/// cannot be resolved to an absolute HTTP(S) URL lose their link-ness and
/// are kept as plain `Other` nodes.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, used for resolving relative hrefs
/// * `paragraph_selector` - Selector for paragraph-level blocks (usually `p`)
pub fn parse_paragraphs(html: &str, base_url: &Url, paragraph_selector: &Selector) -> Vec<Paragraph> {
    let document = Html::parse_document(html);

    document
        .select(paragraph_selector)
        .map(|element| Paragraph {
            nodes: child_nodes(element, base_url),
        })
        .collect()
}

/// Converts an element's direct children into content nodes
fn child_nodes(element: ElementRef, base_url: &Url) -> Vec<ContentNode> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(ContentNode::Text(text.to_string())),
            Node::Element(_) => ElementRef::wrap(child).map(|el| element_node(el, base_url)),
            // Comments, doctypes and processing instructions carry no content
            _ => None,
        })
        .collect()
}

/// Converts one element into a content node
fn element_node(element: ElementRef, base_url: &Url) -> ContentNode {
    let children = child_nodes(element, base_url);

    if element.value().name() == "a" {
        if let Some(href) = element.value().attr("href") {
            if let Some(target) = resolve_href(href, base_url) {
                return ContentNode::Link { target, children };
            }
        }
    }

    ContentNode::Other(children)
}

/// Resolves an href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links (same page anchors)
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
