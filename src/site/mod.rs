// src/site/mod.rs
// =============================================================================
// This module turns website list entries into labeled sentence rows.
//
// Submodules:
// - record: One entry of the website list (URL, label, directives)
// - rows: Builds output rows from sentences
// - process: Scrapes / follows / crawls a single site
// - batch: Runs a whole list of sites and writes the rows
// =============================================================================

pub mod batch;
mod process;
mod record;
mod rows;

pub use process::{SiteOutcome, SiteProcessor};
pub use record::{SiteMode, SiteRecord};
pub use rows::{OutputRow, RowAssembler};
