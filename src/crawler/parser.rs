//! HTML parser for extracting words and links
//!
//! Words are the whitespace-separated tokens of every visible text node;
//! links are the `href`s of `<a>` tags resolved against the page URL.

use crate::crawler::PageContent;
use scraper::{Html, Node, Selector};
use url::Url;

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses HTML content and extracts raw words and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
/// - Anything that resolves to a scheme other than `http`, `https` or `file`
///
/// Words are returned as they appear; normalization happens in the crawl
/// engines.
///
/// # Example
///
/// ```
/// use word_ripple::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello world</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url);
/// assert_eq!(page.words, ["Hello", "world", "Link"]);
/// assert_eq!(page.links, ["https://example.com/page"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        words: extract_words(&document),
        links: extract_links(&document, base_url),
    }
}

/// Collects the words of every visible text node in document order
fn extract_words(document: &Html) -> Vec<String> {
    let mut words = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|element| HIDDEN_ELEMENTS.iter().any(|name| *name == element.name()));
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace().map(str::to_string));
    }

    words
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Absolute form of `href`, or `None` when it is not a followable page
///
/// Fragment-only hrefs point back into the same page. Everything else is
/// resolved against `base_url`, and only `http`, `https` and `file` results
/// are kept, which drops `javascript:`, `mailto:`, `tel:` and `data:` links.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" | "file" => Some(absolute_url.to_string()),
        _ => None,
    }
}
