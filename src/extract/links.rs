// src/extract/links.rs
// =============================================================================
// This module extracts outgoing links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), which never rejects input
//
// Link targets are percent-decoded and collected into a set, so the same
// target showing up twice on a page only counts once.
//
// Rust concepts:
// - BTreeSet: A sorted set (deduplicates and gives a stable iteration order)
// - Iterators and closures: For filtering links
// =============================================================================

use std::collections::BTreeSet;

use scraper::{Html, Selector};

use super::urls;

// Extracts every link target on a page
//
// Parameters:
//   page: the parsed page (see `Html::parse_document`)
//   include_filter: a link is only kept if its raw href contains this
//                   substring (an empty filter keeps everything)
//   exclude_terms: a link is dropped if its raw href contains any of these
//
// Returns: the set of decoded link targets, exactly as written on the page
//          (relative links stay relative)
//
// Example:
//   page = "<a href='/a%20b'>A</a><a href='/login'>Login</a>"
//   include_filter = "", exclude_terms = ["login"]
//   result = {"/a b"}
pub fn extract_links(page: &Html, include_filter: &str, exclude_terms: &[&str]) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in page.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if !is_navigable(href) {
            continue;
        }

        if !href.contains(include_filter) {
            continue;
        }

        if exclude_terms.iter().any(|term| href.contains(term)) {
            continue;
        }

        links.insert(decode(href));
    }

    log::trace!("extracted {} link(s)", links.len());
    links
}

// Same as extract_links, but every link is resolved to an absolute URL
// against `root_url`
pub fn extract_full_links(
    page: &Html,
    root_url: &str,
    include_filter: &str,
    exclude_terms: &[&str],
) -> BTreeSet<String> {
    extract_links(page, include_filter, exclude_terms)
        .iter()
        .map(|link| urls::resolve(link, root_url))
        .collect()
}

// Absolute links that stay on the same domain as `root_url`
//
// This is what the crawler (with no filters) and the "follow links" mode
// walk.
pub fn extract_internal_links(
    page: &Html,
    root_url: &str,
    include_filter: &str,
    exclude_terms: &[&str],
) -> BTreeSet<String> {
    extract_full_links(page, root_url, include_filter, exclude_terms)
        .into_iter()
        .filter(|link| urls::same_domain(link, root_url))
        .collect()
}

// Skips targets that don't point at another page
//
// We skip:
// - empty hrefs and in-page anchors (#section)
// - mailto:, tel:, javascript: and data: links
fn is_navigable(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lower = href.to_ascii_lowercase();
    !["mailto:", "tel:", "javascript:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

// Percent-decodes a link, keeping the raw text if it isn't valid UTF-8
// once decoded
fn decode(href: &str) -> String {
    match urlencoding::decode(href) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => href.to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - `let Some(x) = value else { ... };` binds x if the pattern matches
//    - Otherwise the else block runs, and it must leave the function/loop
//      (return, continue, break)
//    - It keeps the "happy path" unindented
//
// 2. Why BTreeSet instead of HashSet?
//    - Both give set semantics (no duplicates)
//    - BTreeSet also iterates in sorted order, so running the crawler twice
//      on the same site visits pages in the same order
//
// 3. Why take &Html instead of &str?
//    - Parsing is the expensive part
//    - The crawler parses each page once and hands the same document to
//      both the link extractor and the text extractor
//
// 4. What is Cow<str>?
//    - urlencoding::decode returns Cow<str> ("clone on write")
//    - It's borrowed when nothing needed decoding, owned otherwise
//    - .into_owned() turns either case into a String
// -----------------------------------------------------------------------------
