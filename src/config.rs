// src/config.rs
// =============================================================================
// Runtime settings shared by every subcommand.
//
// The CLI flags (see cli.rs) are turned into one `Settings` value, and
// everything else reads from that instead of from the raw arguments.
// =============================================================================

use std::time::Duration;

use crate::cli::CrawlArgs;
use crate::crawl::Budget;
use crate::extract::SentenceCleaner;

// Default per-site page budget
pub const DEFAULT_MAX_PAGES: i64 = 2000;

// Sentences must be longer than this many characters to become rows
pub const DEFAULT_MIN_SENTENCE_LEN: usize = 20;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct Settings {
    pub budget: Budget,
    pub request_timeout: Duration,
    pub site_deadline: Option<Duration>,
    pub min_sentence_len: usize,
    pub concurrency: usize,
    pub user_agent: Option<String>,
    pub extra_stopwords: Vec<String>,
    // Only used when following links; the crawler never filters
    pub link_filter: String,
    pub link_excludes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budget: Budget::from_limit(DEFAULT_MAX_PAGES),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            site_deadline: None,
            min_sentence_len: DEFAULT_MIN_SENTENCE_LEN,
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: None,
            extra_stopwords: Vec::new(),
            link_filter: String::new(),
            link_excludes: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_args(args: &CrawlArgs) -> Self {
        Self {
            budget: Budget::from_limit(args.max_pages),
            // A zero timeout would fail every request, so treat it as 1 second
            request_timeout: Duration::from_secs(args.timeout_secs.max(1)),
            site_deadline: args.site_deadline_secs.map(Duration::from_secs),
            min_sentence_len: args.min_sentence_len,
            concurrency: args.concurrency.max(1),
            user_agent: args.user_agent.clone(),
            extra_stopwords: args.extra_stopwords.clone(),
            link_filter: args.link_filter.clone().unwrap_or_default(),
            link_excludes: args.exclude_links.clone(),
        }
    }

    pub fn cleaner(&self) -> SentenceCleaner {
        SentenceCleaner::default().with_extra_stopwords(&self.extra_stopwords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CrawlArgs {
        CrawlArgs {
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            site_deadline_secs: None,
            min_sentence_len: DEFAULT_MIN_SENTENCE_LEN,
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: None,
            extra_stopwords: Vec::new(),
            link_filter: None,
            exclude_links: Vec::new(),
        }
    }

    #[test]
    fn test_defaults_match_cli_defaults() {
        let settings = Settings::from_args(&args());
        let defaults = Settings::default();
        assert_eq!(settings.budget, defaults.budget);
        assert_eq!(settings.request_timeout, defaults.request_timeout);
        assert_eq!(settings.min_sentence_len, defaults.min_sentence_len);
        assert_eq!(settings.concurrency, defaults.concurrency);
    }

    #[test]
    fn test_negative_max_pages_is_unbounded() {
        let settings = Settings::from_args(&CrawlArgs {
            max_pages: -1,
            ..args()
        });
        assert_eq!(settings.budget, Budget::Unbounded);
    }

    #[test]
    fn test_zero_values_are_clamped() {
        let settings = Settings::from_args(&CrawlArgs {
            timeout_secs: 0,
            concurrency: 0,
            site_deadline_secs: Some(30),
            ..args()
        });
        assert_eq!(settings.request_timeout, Duration::from_secs(1));
        assert_eq!(settings.concurrency, 1);
        assert_eq!(settings.site_deadline, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_extra_stopwords_reach_the_cleaner() {
        let settings = Settings {
            extra_stopwords: vec!["cookies".to_string()],
            ..Settings::default()
        };
        assert!(settings.cleaner().is_stopword("cookies"));
    }
}
