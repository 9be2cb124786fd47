// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_PAGES, DEFAULT_MIN_SENTENCE_LEN, DEFAULT_TIMEOUT_SECS,
};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-sentences",
    version,
    about = "Crawl websites and extract labeled sentences for text classification",
    long_about = "site-sentences scrapes the paragraphs of a web page (and optionally the pages it links to, \
                  or the whole site), cleans them into sentences, and labels each sentence with the \
                  site's classification."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

// Our subcommands (site, batch)
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape one site
    ///
    /// Example: site-sentences site https://example.com/news --crawl --max-pages 100
    Site {
        /// Page to scrape first (e.g., https://example.com/news)
        url: String,

        /// Label attached to every sentence
        #[arg(long, default_value = "unlabeled")]
        classification: String,

        /// Kind of source, copied into every row (e.g., news, blog)
        #[arg(long = "type", default_value = "website")]
        kind: String,

        /// Also scrape the same-domain pages this page links to (one hop)
        #[arg(long)]
        follow: bool,

        /// Crawl the whole site starting from its root page
        #[arg(long, conflicts_with = "follow")]
        crawl: bool,

        /// Output rows in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        crawl_args: CrawlArgs,
    },

    /// Process a JSON list of sites and write all rows to one file
    ///
    /// Example: site-sentences batch sites.json --output rows.json
    Batch {
        /// JSON file with an array of site records
        sites_file: PathBuf,

        /// Where to write the rows (JSON); printed to stdout if omitted
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print per-site summaries as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        crawl_args: CrawlArgs,
    },
}

// Flags shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Maximum pages fetched per site crawl (-1 = no limit)
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES, allow_negative_numbers = true)]
    pub max_pages: i64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Stop working on a site after this many seconds, keeping what was found
    #[arg(long)]
    pub site_deadline_secs: Option<u64>,

    /// Sentences must be longer than this many characters to be kept
    #[arg(long, default_value_t = DEFAULT_MIN_SENTENCE_LEN)]
    pub min_sentence_len: usize,

    /// How many sites to process at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Extra stop word to remove from sentences (repeatable)
    #[arg(long = "stopword")]
    pub extra_stopwords: Vec<String>,

    /// When following links, only follow links containing this text
    #[arg(long)]
    pub link_filter: Option<String>,

    /// When following links, skip links containing this text (repeatable)
    #[arg(long = "exclude-link")]
    pub exclude_links: Vec<String>,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It pulls all the fields of CrawlArgs into the subcommand
//    - So `site` and `batch` both accept --max-pages, --timeout-secs, etc.
//    - Without repeating the definitions twice
//
// 2. Why allow_negative_numbers?
//    - By default clap treats "-1" as a flag named "1"
//    - allow_negative_numbers lets `--max-pages -1` mean "no limit"
//
// 3. Why Option<u64> for site_deadline_secs?
//    - No flag = None = no deadline at all
//    - clap understands Option<T> as "optional argument"
// -----------------------------------------------------------------------------
