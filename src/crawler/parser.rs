//! HTML parser for link discovery
//!
//! Extraction carries no link policy: every anchor is reported, including
//! anchors without an `href`. Resolution and filtering happen later in
//! [`crate::url::normalize`] and the origin check.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// A raw href as found on an anchor; `None` when the anchor has no `href`
pub type RawLink = Option<String>;

/// Extracts the set of raw href values from every `<a>` element
///
/// The html5ever-based parser recovers from malformed markup, so this never
/// fails; broken documents yield whatever anchors were recognizable. An empty
/// document yields an empty set.
///
/// # Arguments
///
/// * `html` - The HTML content to scan
///
/// # Returns
///
/// The unique raw hrefs, unresolved and untrimmed
///
/// # Example
///
/// ```
/// use scoped_crawl::crawler::extract_links;
///
/// let html = r#"<a href="/a">A</a><a href="/a">again</a><a name="top"></a>"#;
/// let links = extract_links(html);
/// assert_eq!(links.len(), 2);
/// assert!(links.contains(&Some("/a".to_string())));
/// assert!(links.contains(&None));
/// ```
pub fn extract_links(html: &str) -> HashSet<RawLink> {
    let mut links = HashSet::new();

    if html.is_empty() {
        return links;
    }

    let document = Html::parse_document(html);

    if let Ok(anchor_selector) = Selector::parse("a") {
        for element in document.select(&anchor_selector) {
            links.insert(element.value().attr("href").map(str::to_string));
        }
    }

    links
}
