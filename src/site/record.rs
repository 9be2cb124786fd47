// src/site/record.rs
// =============================================================================
// One entry of the website list: which page to scrape, how to label the
// text that comes out of it, and whether to follow or crawl its links.
//
// The list is usually exported from a spreadsheet, so the follow/crawl
// directives arrive as "yes"/"no" text (JSON booleans and 0/1 work too),
// and the year may arrive as text.
// =============================================================================

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Free-form note about the site, not used for processing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The page to scrape first
    pub url: String,

    /// Label attached to every sentence from this site
    pub classification: String,

    /// Scrape the pages the first page links to (one hop only)
    #[serde(default, deserialize_with = "directive")]
    pub follow_links: bool,

    /// Crawl the whole site starting from its root
    #[serde(default, deserialize_with = "directive")]
    pub crawl_website: bool,

    #[serde(default, deserialize_with = "year", skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Kind of source (e.g. "news", "blog"), copied into every row
    #[serde(rename = "type", default)]
    pub kind: String,
}

// What to do after the first page has been scraped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteMode {
    SinglePage,
    FollowLinks,
    Crawl,
}

impl SiteRecord {
    pub fn new(url: &str, classification: &str, kind: &str) -> Self {
        Self {
            description: None,
            url: url.to_string(),
            classification: classification.to_string(),
            follow_links: false,
            crawl_website: false,
            year: None,
            kind: kind.to_string(),
        }
    }

    // Reads one entry of a website list
    pub fn from_value(entry: &Value) -> Result<Self> {
        Self::deserialize(entry).context("malformed site record")
    }

    // Following links wins over crawling when both are set
    pub fn mode(&self) -> SiteMode {
        if self.follow_links {
            SiteMode::FollowLinks
        } else if self.crawl_website {
            SiteMode::Crawl
        } else {
            SiteMode::SinglePage
        }
    }

    // Checks that the record points at a real web page
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(self.url.trim())
            .with_context(|| format!("invalid site URL '{}'", self.url))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            bail!("site URL '{}' is not an http(s) URL", self.url);
        }

        if parsed.host_str().is_none() {
            bail!("site URL '{}' has no host", self.url);
        }

        Ok(())
    }
}

// Labels come in English or French
pub fn is_positive_label(classification: &str) -> bool {
    matches!(classification.trim().to_lowercase().as_str(), "positive" | "positif")
}

pub fn is_negative_label(classification: &str) -> bool {
    matches!(classification.trim().to_lowercase().as_str(), "negative" | "negatif")
}

// Accepts "yes"/"no" (any case, surrounding spaces ignored), a boolean,
// or a number (non-zero is yes). Anything other than "yes" counts as no.
fn directive<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Directive {
        Flag(bool),
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Directive>::deserialize(deserializer)? {
        None => false,
        Some(Directive::Flag(flag)) => flag,
        Some(Directive::Number(number)) => number != 0.0,
        Some(Directive::Text(text)) => text.trim().eq_ignore_ascii_case("yes"),
    })
}

// Accepts 2018, 2018.0 or "2018". Blank or unreadable text means no year.
fn year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Whole(i32),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Year>::deserialize(deserializer)? {
        None => None,
        Some(Year::Whole(year)) => Some(year),
        Some(Year::Float(year)) if year.fract() == 0.0 => Some(year as i32),
        Some(Year::Float(_)) => None,
        Some(Year::Text(text)) => text.trim().parse().ok(),
    })
}
