// src/site/batch.rs
// =============================================================================
// Runs a whole website list.
//
// - Loads the website list from a JSON file (each entry is checked on its
//   own later, so one malformed entry only loses that entry)
// - Processes several sites at the same time (each site's crawl is
//   completely independent of the others)
// - Reports each site as it finishes
// - Writes all rows to one JSON file
//
// One failing site never stops the batch; it just contributes no rows.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;

use super::record::{is_negative_label, is_positive_label};
use super::{OutputRow, SiteOutcome, SiteProcessor};
use crate::fetch::PageFetcher;

// Reads the website list
//
// Expected format: a JSON array of site records, e.g.
//   [{"url": "https://x.com/", "classification": "positive",
//     "follow_links": "no", "crawl_website": "yes", "year": 2018, "type": "news"}]
//
// Only the outer array is checked here. The entries are returned as raw JSON
// and turned into SiteRecords one by one while the batch runs.
pub async fn load_sites(path: &Path) -> Result<Vec<Value>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read site list {}", path.display()))?;

    let entries: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse site list {}", path.display()))?;

    Ok(entries)
}

// Processes every entry, up to `concurrency` at a time
//
// Outcomes come back in the same order as `sites`. `on_site` is called as
// each outcome becomes available, for progress output.
pub async fn run_batch<F, C>(
    processor: &SiteProcessor<F>,
    sites: &[Value],
    concurrency: usize,
    mut on_site: C,
) -> Vec<SiteOutcome>
where
    F: PageFetcher,
    C: FnMut(&SiteOutcome),
{
    log::info!("Processing {} site(s), {} at a time", sites.len(), concurrency);

    // .buffered(n) runs up to n futures at once but yields results in
    // input order
    let mut outcomes_stream = stream::iter(sites)
        .map(|entry| processor.process_entry(entry))
        .buffered(concurrency.max(1));

    let mut outcomes = Vec::with_capacity(sites.len());
    while let Some(outcome) = outcomes_stream.next().await {
        on_site(&outcome);
        outcomes.push(outcome);
    }

    outcomes
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    pub sites: usize,
    pub failed_sites: usize,
    pub pages: usize,
    pub rows: usize,
    pub failed_pages: usize,
}

impl BatchTotals {
    pub fn from_outcomes(outcomes: &[SiteOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut totals, outcome| {
            totals.sites += 1;
            totals.failed_sites += usize::from(outcome.is_failed());
            totals.pages += outcome.page_count;
            totals.rows += outcome.rows.len();
            totals.failed_pages += outcome.failures.len();
            totals
        })
    }
}

// How many rows carry a positive / negative label
pub fn label_counts(rows: &[OutputRow]) -> (usize, usize) {
    let positive = rows
        .iter()
        .filter(|row| is_positive_label(&row.classification))
        .count();
    let negative = rows
        .iter()
        .filter(|row| is_negative_label(&row.classification))
        .count();
    (positive, negative)
}

// All rows of all sites, in site order
pub fn collect_rows(outcomes: Vec<SiteOutcome>) -> Vec<OutputRow> {
    outcomes.into_iter().flat_map(|outcome| outcome.rows).collect()
}

// Writes rows as a pretty-printed JSON array
pub async fn write_rows(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write rows to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::fetch::testing::MapFetcher;
    use serde_json::json;

    const TEXT: &str = "Community gardens bring neighbours together every summer";

    fn sites() -> Vec<Value> {
        vec![
            json!({"url": "https://a.com/", "classification": "positive", "type": "news"}),
            json!({"url": "bad url", "classification": "negative", "type": "blog"}),
            json!({"url": "https://b.com/", "classification": "negatif", "type": "blog"}),
        ]
    }

    fn temp_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("site-sentences-{}-{}", name, std::process::id()))
    }

    fn fetcher() -> MapFetcher {
        MapFetcher::new()
            .page("https://a.com/", TEXT, &[])
            .page("https://b.com/", TEXT, &[])
    }

    #[tokio::test]
    async fn test_run_batch_keeps_order_and_survives_failures() {
        let processor = SiteProcessor::new(fetcher(), &Settings::default());
        let sites = sites();

        let mut seen = Vec::new();
        let outcomes = run_batch(&processor, &sites, 2, |o| seen.push(o.url.clone())).await;

        assert_eq!(seen, vec!["https://a.com/", "bad url", "https://b.com/"]);
        assert!(outcomes[1].is_failed());

        let totals = BatchTotals::from_outcomes(&outcomes);
        assert_eq!(
            totals,
            BatchTotals {
                sites: 3,
                failed_sites: 1,
                pages: 2,
                rows: 2,
                failed_pages: 0,
            }
        );

        let rows = collect_rows(outcomes);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://a.com/");
        assert_eq!(label_counts(&rows), (1, 1));
    }

    #[tokio::test]
    async fn test_load_and_write_round_trip_through_files() {
        let dir = temp_dir("round-trip");
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let list = dir.join("sites.json");
        tokio::fs::write(
            &list,
            r#"[{"url": "https://a.com/", "classification": "positive",
                 "follow_links": "no", "crawl_website": "yes", "type": "news"}]"#,
        )
        .await
        .unwrap();

        let sites = load_sites(&list).await.unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0]["crawl_website"], "yes");

        let out = dir.join("rows.json");
        let rows = vec![OutputRow {
            source: "website".to_string(),
            text: "gardens neighbours summer".to_string(),
            classification: "positive".to_string(),
            url: "https://a.com/".to_string(),
            kind: "news".to_string(),
        }];
        write_rows(&out, &rows).await.unwrap();
        let written: Vec<OutputRow> =
            serde_json::from_str(&tokio::fs::read_to_string(&out).await.unwrap()).unwrap();
        assert_eq!(written, rows);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_entries_only_lose_themselves() {
        let dir = temp_dir("malformed");
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let list = dir.join("sites.json");
        tokio::fs::write(
            &list,
            r#"[
                {"url": "https://a.com/", "classification": "positive", "type": "news"},
                {"url": "https://b.com/", "classification": "negative",
                 "follow_links": "no", "year": "2018", "type": "blog"},
                {"url": "https://c.com/", "follow_links": "no", "type": "blog"},
                {"url": "https://a.com/", "classification": "positive",
                 "follow_links": ["yes"], "type": "news"}
            ]"#,
        )
        .await
        .unwrap();

        let sites = load_sites(&list).await.unwrap();
        assert_eq!(sites.len(), 4);

        let fetcher = fetcher().page("https://c.com/", TEXT, &[]);
        let processor = SiteProcessor::new(fetcher, &Settings::default());
        let outcomes = run_batch(&processor, &sites, 2, |_| {}).await;

        assert_eq!(outcomes[0].rows.len(), 1);
        assert_eq!(outcomes[1].rows.len(), 1);
        assert!(outcomes[2].is_failed());
        assert_eq!(outcomes[2].url, "https://c.com/");
        assert!(outcomes[3].is_failed());

        let totals = BatchTotals::from_outcomes(&outcomes);
        assert_eq!(totals.failed_sites, 2);
        assert_eq!(totals.rows, 2);
        // c.com is never fetched because its entry has no classification
        assert_eq!(processor.fetcher().request_count(), 2);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_site_list_must_be_an_array() {
        let dir = temp_dir("not-array");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let list = dir.join("sites.json");
        tokio::fs::write(&list, r#"{"url": "https://a.com/"}"#).await.unwrap();

        assert!(load_sites(&list).await.is_err());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let result = load_sites(Path::new("/definitely/not/here.json")).await;
        assert!(result.is_err());
    }
}
