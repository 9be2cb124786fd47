// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling starting from a site's root URL
// - Respects same-domain restriction (doesn't crawl external sites)
// - Each URL is visited at most once per crawl
// - Optional page budget and wall-clock deadline
// - A page that fails to load never stops the crawl
//
// Rust concepts:
// - Async programming: Fetching pages is network I/O
// - Collections: HashSet for tracking visited URLs, Vec as a stack
// - Enums: Budget and StopReason model the "why" explicitly
// =============================================================================

mod engine;
mod frontier;

pub use engine::crawl_website;
use frontier::CrawlContext;

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fetch::{FailureClass, FetchError};

// Maximum number of pages one crawl may fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    Unbounded,
    Pages(usize),
}

impl Budget {
    // Converts a command-line style limit: any negative number (usually -1)
    // means "no limit"
    pub fn from_limit(limit: i64) -> Self {
        match usize::try_from(limit) {
            Ok(pages) => Budget::Pages(pages),
            Err(_) => Budget::Unbounded,
        }
    }

    // True if another page may be fetched after `page_count` pages
    pub fn allows(&self, page_count: usize) -> bool {
        match self {
            Budget::Unbounded => true,
            Budget::Pages(limit) => page_count < *limit,
        }
    }
}

// Why a page produced no text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    pub url: String,
    pub class: FailureClass,
    pub message: String,
}

impl PageFailure {
    pub fn new(url: &str, error: &FetchError) -> Self {
        Self {
            url: url.to_string(),
            class: error.class(),
            message: error.to_string(),
        }
    }
}

// The result of visiting one URL
//
// `sentences` is empty when the page failed to load; `failure` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub sentences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<PageFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every reachable same-domain page was visited
    FrontierExhausted,
    /// The page budget ran out
    BudgetReached,
    /// The deadline passed; results so far are kept
    DeadlineReached,
}

#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    pub budget: Budget,
    pub deadline: Option<Instant>,
}

impl CrawlOptions {
    pub fn new(budget: Budget) -> Self {
        Self {
            budget,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub results: Vec<PageRecord>,
    pub page_count: usize,
    pub stop_reason: StopReason,
}

impl CrawlOutcome {
    pub fn failures(&self) -> impl Iterator<Item = &PageFailure> {
        self.results.iter().filter_map(|page| page.failure.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_from_limit() {
        assert_eq!(Budget::from_limit(-1), Budget::Unbounded);
        assert_eq!(Budget::from_limit(-50), Budget::Unbounded);
        assert_eq!(Budget::from_limit(0), Budget::Pages(0));
        assert_eq!(Budget::from_limit(2000), Budget::Pages(2000));
    }

    #[test]
    fn test_budget_allows() {
        assert!(Budget::Unbounded.allows(usize::MAX));
        assert!(Budget::Pages(3).allows(2));
        assert!(!Budget::Pages(3).allows(3));
        assert!(!Budget::Pages(0).allows(0));
    }
}
