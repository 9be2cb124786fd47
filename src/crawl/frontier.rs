// src/crawl/frontier.rs
// =============================================================================
// The state of one crawl run.
//
// - Frontier: URLs we've discovered but not visited yet. It's a stack
//   (last in, first out), which makes the crawl depth-first.
// - Visited set: URLs we've already processed. It only ever grows.
//
// Both live inside a CrawlContext that belongs to exactly one call of
// crawl_website - nothing is shared between crawls.
// =============================================================================

use std::collections::HashSet;

use super::PageRecord;

// URLs waiting to be visited
//
// The same URL may be on the stack more than once; duplicates are skipped
// when they're popped, not when they're pushed.
#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<String>,
}

impl Frontier {
    pub fn new(seed: &str) -> Self {
        Self {
            stack: vec![seed.to_string()],
        }
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, urls: I) {
        self.stack.extend(urls);
    }

    // The most recently pushed URL
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

// Everything one crawl run mutates
#[derive(Debug)]
pub struct CrawlContext {
    pub root_url: String,
    pub frontier: Frontier,
    visited: HashSet<String>,
    pub page_count: usize,
    pub results: Vec<PageRecord>,
}

impl CrawlContext {
    pub fn new(root_url: &str) -> Self {
        Self {
            root_url: root_url.to_string(),
            frontier: Frontier::new(root_url),
            visited: HashSet::new(),
            page_count: 0,
            results: Vec::new(),
        }
    }

    // Pops URLs until one we haven't seen yet comes up, marks it visited
    // and counts it
    //
    // Returns None once the frontier runs dry.
    pub fn next_unvisited(&mut self) -> Option<String> {
        while let Some(url) = self.frontier.pop() {
            // insert() returns false if the URL was already in the set
            if self.visited.insert(url.clone()) {
                self.page_count += 1;
                return Some(url);
            }
        }
        None
    }
}
