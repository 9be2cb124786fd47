// src/site/rows.rs
// =============================================================================
// Turns extracted sentences into output rows.
//
// Each row pairs one sentence with the metadata of the site it came from:
//   source, text, classification, url, type
// Sentences that are too short to be useful training data are dropped.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::SiteRecord;
use crate::crawl::PageRecord;

// Every row produced by this tool comes from a website
pub const SOURCE_TAG: &str = "website";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub source: String,
    pub text: String,
    pub classification: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RowAssembler {
    min_sentence_len: usize,
}

impl RowAssembler {
    // Sentences must be strictly longer than `min_sentence_len` characters
    pub fn new(min_sentence_len: usize) -> Self {
        Self { min_sentence_len }
    }

    pub fn make_rows(&self, sentences: &[String], site: &SiteRecord, source_url: &str) -> Vec<OutputRow> {
        sentences
            .iter()
            .filter(|sentence| sentence.chars().count() > self.min_sentence_len)
            .map(|sentence| OutputRow {
                source: SOURCE_TAG.to_string(),
                text: sentence.clone(),
                classification: site.classification.clone(),
                url: source_url.to_string(),
                kind: site.kind.clone(),
            })
            .collect()
    }

    // Rows for every page of a crawl, each tagged with the page's own URL
    pub fn rows_from_pages(&self, pages: &[PageRecord], site: &SiteRecord) -> Vec<OutputRow> {
        pages
            .iter()
            .flat_map(|page| self.make_rows(&page.sentences, site, &page.url))
            .collect()
    }
}
