// src/extract/mod.rs
// =============================================================================
// This module contains everything that turns a fetched page into data.
//
// Submodules:
// - urls: Pure helpers for resolving and comparing URLs
// - links: Extracts outgoing links from HTML pages
// - text: Extracts paragraph text from HTML pages
// - clean: Tokenizes and filters text passages into clean sentences
//
// Nothing in here touches the network; every function takes page content
// that was already fetched.
// =============================================================================

pub mod clean;
pub mod links;
pub mod text;
pub mod urls;

pub use clean::SentenceCleaner;
pub use links::extract_internal_links;
pub use text::extract_clean_text;
