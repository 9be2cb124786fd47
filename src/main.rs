// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls how chatty it is)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print or save the rows and the totals
// 5. Exit with proper code (0 = success, 1 = a site failed, 2 = error)
//
// Rust concepts used:
// - async/await: Because fetching pages is network I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - runtime settings
mod crawl;    // src/crawl/ - website crawling logic
mod extract;  // src/extract/ - links, text and sentence cleaning
mod fetch;    // src/fetch/ - getting pages over HTTP
mod site;     // src/site/ - site records, rows, batch processing

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;  // Parser trait enables the parse() method

use cli::{Cli, Commands, CrawlArgs};
use config::Settings;
use fetch::HttpFetcher;
use site::batch::{self, BatchTotals};
use site::{OutputRow, SiteOutcome, SiteProcessor, SiteRecord};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("site_sentences=info"),
    )
    .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every site was processed
//   Ok(1) = at least one site failed entirely
//   Err = unexpected error (bad arguments, unreadable files, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Site {
            url,
            classification,
            kind,
            follow,
            crawl,
            json,
            crawl_args,
        } => {
            let record = SiteRecord {
                follow_links: follow,
                crawl_website: crawl,
                ..SiteRecord::new(&url, &classification, &kind)
            };
            handle_site(&record, json, &crawl_args).await
        }
        Commands::Batch {
            sites_file,
            output,
            json,
            crawl_args,
        } => handle_batch(&sites_file, output, json, &crawl_args).await,
    }
}

fn build_processor(settings: &Settings) -> Result<SiteProcessor<HttpFetcher>> {
    let fetcher = HttpFetcher::new(settings.request_timeout, settings.user_agent.as_deref())?;
    Ok(SiteProcessor::new(fetcher, settings))
}

// Handles the 'site' subcommand
//
// Progress goes to stderr so `--json` output on stdout stays parseable.
async fn handle_site(record: &SiteRecord, json: bool, crawl_args: &CrawlArgs) -> Result<i32> {
    let settings = Settings::from_args(crawl_args);
    let processor = build_processor(&settings)?;

    eprintln!("🔍 Processing site: {} ({:?})", record.url, record.mode());

    let outcome = processor.process_site(record).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.rows)?);
    } else {
        print_rows(&outcome.rows);
        print_site_totals(&outcome);
    }

    Ok(if outcome.is_failed() { 1 } else { 0 })
}

// Handles the 'batch' subcommand
//
// Progress goes to stderr so that rows printed to stdout stay valid JSON.
async fn handle_batch(
    sites_file: &Path,
    output: Option<PathBuf>,
    json: bool,
    crawl_args: &CrawlArgs,
) -> Result<i32> {
    let settings = Settings::from_args(crawl_args);
    let sites = batch::load_sites(sites_file).await?;
    let processor = build_processor(&settings)?;

    eprintln!("🔍 Processing websites file: {}", sites_file.display());
    eprintln!("📄 Found {} site(s)", sites.len());

    let outcomes = batch::run_batch(&processor, &sites, settings.concurrency, |outcome| {
        if !json {
            print_site_totals(outcome);
        }
    })
    .await;

    let totals = BatchTotals::from_outcomes(&outcomes);

    if json {
        eprintln!("{}", serde_json::to_string_pretty(&outcomes)?);
    }

    let rows = batch::collect_rows(outcomes);
    let (positive, negative) = batch::label_counts(&rows);

    match &output {
        Some(path) => {
            batch::write_rows(path, &rows).await?;
            eprintln!("💾 Wrote {} row(s) to {}", rows.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&rows)?),
    }

    eprintln!("{}", "-".repeat(70));
    eprintln!("📊 Total sites: {} ({} failed)", totals.sites, totals.failed_sites);
    eprintln!("📋 Total pages visited: {} ({} failed)", totals.pages, totals.failed_pages);
    eprintln!(
        "✅ Total rows processed: {} ({} positive, {} negative)",
        totals.rows, positive, negative
    );
    eprintln!("{}", "-".repeat(70));

    Ok(if totals.failed_sites > 0 { 1 } else { 0 })
}

fn print_site_totals(outcome: &SiteOutcome) {
    eprintln!("{}", "-".repeat(70));
    eprintln!("🌐 {}", outcome.url);
    match &outcome.error {
        Some(error) => eprintln!("   ❌ Failed: {}", error),
        None => {
            eprintln!("   Website pages visited: {}", outcome.page_count);
            eprintln!("   Website rows generated: {}", outcome.rows.len());
            if !outcome.failures.is_empty() {
                eprintln!("   ⚠️  Pages that failed to load: {}", outcome.failures.len());
            }
        }
    }
}

// Prints rows as a human-readable table in the terminal
fn print_table_header() {
    println!("{:<40} {:<15} {:<60}", "URL", "CLASS", "TEXT");
    println!("{}", "=".repeat(115));
}

fn print_rows(rows: &[OutputRow]) {
    if rows.is_empty() {
        println!("⚠️  No sentences found");
        return;
    }

    print_table_header();
    for row in rows {
        println!(
            "{:<40} {:<15} {:<60}",
            truncate(&row.url, 40),
            truncate(&row.classification, 15),
            truncate(&row.text, 60)
        );
    }
    println!();
}

// Shortens text for display, counting characters rather than bytes
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
