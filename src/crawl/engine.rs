// src/crawl/engine.rs
// =============================================================================
// This module implements website crawling with a depth-first approach.
//
// How it works:
// 1. Start with the root URL on a stack (the frontier)
// 2. Pop the most recently discovered URL; skip it if already visited
// 3. Mark it visited and count it against the page budget
// 4. Fetch it, extract its clean sentences and record them
// 5. Extract its links, resolve them against the root, keep same-domain ones,
//    and push them onto the stack
// 6. Repeat until the stack is empty, the budget is used up, or the
//    deadline passes
//
// Failure containment:
// - A page that fails to load is still recorded (with no sentences and the
//   reason it failed) and is never retried
// - Nothing that goes wrong with one page stops the crawl
// =============================================================================

use std::time::Instant;

use scraper::Html;

use super::{CrawlContext, CrawlOptions, CrawlOutcome, PageFailure, PageRecord, StopReason};
use crate::extract::{extract_clean_text, extract_internal_links, SentenceCleaner};
use crate::fetch::{fetch_before, PageFetcher};

// Log a progress line every this many pages
const PROGRESS_INTERVAL: usize = 250;

// Crawls a website starting from its root URL
//
// Parameters:
//   fetcher: where pages come from (HTTP in production, a map in tests)
//   cleaner: turns paragraph text into clean sentences
//   root_url: the page to start from; also decides which domain we stay on
//   options: page budget and optional deadline
//
// Returns: one PageRecord per visited URL (in visit order) plus the number
//          of pages fetched. This function never fails.
pub async fn crawl_website<F>(
    fetcher: &F,
    cleaner: &SentenceCleaner,
    root_url: &str,
    options: &CrawlOptions,
) -> CrawlOutcome
where
    F: PageFetcher + ?Sized,
{
    log::info!("Crawling website: {}", root_url);

    let mut ctx = CrawlContext::new(root_url);

    let stop_reason = loop {
        if !options.budget.allows(ctx.page_count) {
            break StopReason::BudgetReached;
        }

        if deadline_passed(options.deadline) {
            log::warn!(
                "deadline reached while crawling {} after {} page(s)",
                root_url,
                ctx.page_count
            );
            break StopReason::DeadlineReached;
        }

        let Some(url) = ctx.next_unvisited() else {
            break StopReason::FrontierExhausted;
        };

        if ctx.page_count % PROGRESS_INTERVAL == 0 {
            log::info!(
                "Website pages visited: {} ({} queued)",
                ctx.page_count,
                ctx.frontier.len()
            );
        }

        visit(fetcher, cleaner, &mut ctx, url, options).await;
    };

    if !ctx.frontier.is_empty() {
        log::debug!("discarding {} queued URL(s)", ctx.frontier.len());
    }
    log::info!("Website pages: {} ({:?})", ctx.page_count, stop_reason);

    CrawlOutcome {
        results: ctx.results,
        page_count: ctx.page_count,
        stop_reason,
    }
}

// Fetches one page, records its sentences and queues its links
async fn visit<F>(
    fetcher: &F,
    cleaner: &SentenceCleaner,
    ctx: &mut CrawlContext,
    url: String,
    options: &CrawlOptions,
) where
    F: PageFetcher + ?Sized,
{
    match fetch_before(fetcher, &url, options.deadline).await {
        Ok(html) => {
            // One parse serves both extractors
            let page = Html::parse_document(&html);
            let sentences = extract_clean_text(&page, cleaner);
            let links = extract_internal_links(&page, &ctx.root_url, "", &[]);
            log::debug!(
                "{}: {} sentence(s), {} internal link(s)",
                url,
                sentences.len(),
                links.len()
            );

            ctx.frontier.extend(links);
            ctx.results.push(PageRecord {
                url,
                sentences,
                failure: None,
            });
        }
        Err(error) => {
            let failure = PageFailure::new(&url, &error);
            log::warn!(
                "failed to fetch {} ({:?}): {}",
                url,
                failure.class,
                failure.message
            );

            ctx.results.push(PageRecord {
                url,
                sentences: Vec::new(),
                failure: Some(failure),
            });
        }
    }
}

fn deadline_passed(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|deadline| Instant::now() >= deadline)
}
