// src/fetch/mod.rs
// =============================================================================
// This module is the boundary between the crawler and the network.
//
// Anything that can turn a URL into page content implements `PageFetcher`.
// The real implementation is `HttpFetcher` (reqwest); tests use an in-memory
// map of pages instead.
//
// A fetch either succeeds with the page HTML or fails with a `FetchError`.
// Fetchers never panic and never return anything else - the crawler decides
// what a failure means.
// =============================================================================

mod error;
mod http;

pub use error::{FailureClass, FetchError};
pub use http::HttpFetcher;

use async_trait::async_trait;
use std::time::Instant;

// Anything that can fetch a page
//
// Implementations must be safe to share between concurrently running site
// crawls, hence the Send + Sync bounds.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    // Fetches the page at `url` and returns its HTML
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

// Fetches a page, giving up once `deadline` has passed
//
// With no deadline this is just `fetcher.fetch(url)`.
pub async fn fetch_before<F>(
    fetcher: &F,
    url: &str,
    deadline: Option<Instant>,
) -> Result<String, FetchError>
where
    F: PageFetcher + ?Sized,
{
    match deadline {
        None => fetcher.fetch(url).await,
        Some(deadline) => {
            match tokio::time::timeout_at(deadline.into(), fetcher.fetch(url)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::DeadlineExceeded),
            }
        }
    }
}

// An in-memory fetcher for tests: a map of URL -> HTML
//
// URLs that aren't in the map fail with HTTP 404, URLs marked as hanging
// never answer, and every call is counted so tests can check how many pages
// were actually requested.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MapFetcher {
        pages: HashMap<String, String>,
        hanging: HashSet<String>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        // Adds a page whose body links to each of `links` and contains `text`
        pub fn page(mut self, url: &str, text: &str, links: &[&str]) -> Self {
            let anchors: String = links
                .iter()
                .map(|link| format!(r#"<a href="{}">link</a>"#, link))
                .collect();
            let html = format!("<html><body><p>{}</p>{}</body></html>", text, anchors);
            self.pages.insert(url.to_string(), html);
            self
        }

        // Requests for `url` never complete
        pub fn hanging(mut self, url: &str) -> Self {
            self.hanging.insert(url.to_string());
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().map(|r| r.len()).unwrap_or(0)
        }

        pub fn requested(&self) -> Vec<String> {
            self.requests.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(url.to_string());
            }
            if self.hanging.contains(url) {
                std::future::pending::<()>().await;
            }
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }

    // A fetcher that fails every request
    pub struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Err(FetchError::Connect("connection refused".to_string()))
        }
    }

    // A fetcher that never answers
    pub struct HangingFetcher;

    #[async_trait]
    impl PageFetcher for HangingFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            std::future::pending().await
        }
    }
}
