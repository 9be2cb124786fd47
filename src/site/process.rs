// src/site/process.rs
// =============================================================================
// Processes one entry of the website list.
//
// Steps:
// 1. Always scrape the site's own URL first
// 2. Then, depending on the record:
//    - follow_links: scrape each same-domain page the first page links to
//      (one hop, no further)
//    - crawl_website: crawl the whole site from its root page
//    - neither: stop after the first page
//
// A site that goes wrong in any way (a malformed record, a bad URL, a bug,
// a panic) produces an empty outcome with the reason attached, and the
// batch moves on.
// =============================================================================

use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use futures::FutureExt;  // gives us .catch_unwind() on futures
use scraper::Html;
use serde::Serialize;
use serde_json::Value;

use super::{OutputRow, RowAssembler, SiteMode, SiteRecord};
use crate::config::Settings;
use crate::crawl::{crawl_website, Budget, CrawlOptions, PageFailure};
use crate::extract::{extract_clean_text, extract_internal_links, urls, SentenceCleaner};
use crate::fetch::{fetch_before, PageFetcher};

// Everything produced for one site
#[derive(Debug, Clone, Serialize)]
pub struct SiteOutcome {
    pub url: String,
    #[serde(skip)]
    pub rows: Vec<OutputRow>,
    pub row_count: usize,
    pub page_count: usize,
    pub failures: Vec<PageFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SiteOutcome {
    fn new(url: &str, rows: Vec<OutputRow>, page_count: usize, failures: Vec<PageFailure>) -> Self {
        Self {
            url: url.to_string(),
            row_count: rows.len(),
            rows,
            page_count,
            failures,
            error: None,
        }
    }

    // Zero rows, zero pages, and the reason why
    pub fn failed(url: &str, error: &anyhow::Error) -> Self {
        Self {
            url: url.to_string(),
            rows: Vec::new(),
            row_count: 0,
            page_count: 0,
            failures: Vec::new(),
            error: Some(format!("{:#}", error)),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

// Scraped sentences of one page, plus the same-domain links it contains
// (both empty when the fetch failed)
struct ScrapedPage {
    sentences: Vec<String>,
    links: BTreeSet<String>,
}

// Processes site records with one fetcher and one set of settings
pub struct SiteProcessor<F> {
    fetcher: F,
    cleaner: SentenceCleaner,
    assembler: RowAssembler,
    budget: Budget,
    site_deadline: Option<Duration>,
    link_filter: String,
    link_excludes: Vec<String>,
}

impl<F: PageFetcher> SiteProcessor<F> {
    pub fn new(fetcher: F, settings: &Settings) -> Self {
        Self {
            fetcher,
            cleaner: settings.cleaner(),
            assembler: RowAssembler::new(settings.min_sentence_len),
            budget: settings.budget,
            site_deadline: settings.site_deadline,
            link_filter: settings.link_filter.clone(),
            link_excludes: settings.link_excludes.clone(),
        }
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // Processes one raw entry of a website list; never fails
    //
    // An entry that isn't a usable site record (wrong field types, missing
    // url or classification) becomes a failed outcome for that entry only.
    pub async fn process_entry(&self, entry: &Value) -> SiteOutcome {
        match SiteRecord::from_value(entry) {
            Ok(site) => self.process_site(&site).await,
            Err(error) => {
                let url = entry
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or("<missing url>");
                log::error!("site {} failed: {:#}", url, error);
                SiteOutcome::failed(url, &error)
            }
        }
    }

    // Processes one site; never fails
    //
    // Any error (or panic) while processing is logged and turned into an
    // outcome with no rows, no pages and `error` set.
    pub async fn process_site(&self, site: &SiteRecord) -> SiteOutcome {
        log::info!("Processing site: {} ({:?})", site.url, site.mode());

        let result = AssertUnwindSafe(self.try_process_site(site))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(anyhow!("panicked while processing site")));

        match result {
            Ok(outcome) => outcome,
            Err(error) => {
                log::error!("site {} failed: {:#}", site.url, error);
                SiteOutcome::failed(&site.url, &error)
            }
        }
    }

    async fn try_process_site(&self, site: &SiteRecord) -> Result<SiteOutcome> {
        site.validate()?;

        let url = site.url.trim();
        let root_url = urls::domain_root(url);
        let deadline = self.site_deadline.map(|limit| Instant::now() + limit);
        let mut failures = Vec::new();

        let first = self.scrape(url, &root_url, deadline, &mut failures).await;
        let mut rows = self.assembler.make_rows(&first.sentences, site, url);
        let mut page_count = 1;

        match site.mode() {
            SiteMode::SinglePage => {}
            SiteMode::FollowLinks => {
                log::info!("Following {} link(s) from {}", first.links.len(), url);

                for link in first.links {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        log::warn!("deadline reached while following links of {}", url);
                        break;
                    }

                    log::debug!("Following: {}", link);
                    let page = self.scrape(&link, &root_url, deadline, &mut failures).await;
                    rows.extend(self.assembler.make_rows(&page.sentences, site, &link));
                    page_count += 1;
                }
            }
            SiteMode::Crawl => {
                let options = CrawlOptions::new(self.budget).with_deadline(deadline);
                let outcome = crawl_website(&self.fetcher, &self.cleaner, &root_url, &options).await;
                log::debug!("crawl of {} stopped: {:?}", root_url, outcome.stop_reason);

                rows.extend(self.assembler.rows_from_pages(&outcome.results, site));
                failures.extend(outcome.failures().cloned());
                page_count = outcome.page_count;
            }
        }

        log::info!(
            "Site {}: {} page(s), {} row(s), {} failed page(s)",
            url,
            page_count,
            rows.len(),
            failures.len()
        );

        Ok(SiteOutcome::new(url, rows, page_count, failures))
    }

    // Fetches a page, extracts its clean sentences and its same-domain
    // links (with the follow-mode link filters applied)
    //
    // A failed fetch gives no sentences and no links, and is added to
    // `failures`.
    async fn scrape(
        &self,
        url: &str,
        root_url: &str,
        deadline: Option<Instant>,
        failures: &mut Vec<PageFailure>,
    ) -> ScrapedPage {
        match fetch_before(&self.fetcher, url, deadline).await {
            Ok(html) => {
                let page = Html::parse_document(&html);
                let excludes: Vec<&str> = self.link_excludes.iter().map(String::as_str).collect();
                ScrapedPage {
                    sentences: extract_clean_text(&page, &self.cleaner),
                    links: extract_internal_links(&page, root_url, &self.link_filter, &excludes),
                }
            }
            Err(error) => {
                let failure = PageFailure::new(url, &error);
                log::warn!("failed to fetch {} ({:?}): {}", url, failure.class, failure.message);
                failures.push(failure);
                ScrapedPage {
                    sentences: Vec::new(),
                    links: BTreeSet::new(),
                }
            }
        }
    }
}
