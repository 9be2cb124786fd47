// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One shared reqwest client per run (connection pooling)
// - Every request has a timeout, so one unreachable page can't stall a crawl
// - Follows a limited number of redirects
// - Non-2xx responses count as failures
//
// Rust concepts:
// - async/await: For network I/O
// - Traits: HttpFetcher implements the PageFetcher trait
// - From: reqwest errors are converted into our own FetchError
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::{FetchError, PageFetcher};

const DEFAULT_USER_AGENT: &str = concat!("site-sentences/", env!("CARGO_PKG_VERSION"));

// Fetches pages with a real HTTP client
//
// Client is cheap to clone (it's just a reference counter internally), so
// HttpFetcher is too.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher whose requests give up after `timeout`
    //
    // Parameters:
    //   timeout: per-request timeout (connect + download)
    //   user_agent: optional User-Agent header, defaults to "site-sentences/<version>"
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))  // Follow up to 5 redirects
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // text() decodes the body using the charset from Content-Type
        let html = response.text().await?;
        log::debug!("fetched {} ({} bytes)", url, html.len());
        Ok(html)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[async_trait] do?
//    - It lets a trait have async methods that can be used as `dyn Trait`
//      or across threads
//    - Under the hood it turns `async fn` into a method returning a boxed
//      future
//
// 2. How does `?` work with two error types here?
//    - send() and text() return reqwest::Error
//    - Our function returns FetchError
//    - Because we implemented From<reqwest::Error> for FetchError, `?`
//      converts automatically
//
// 3. What is concat!/env!?
//    - Compile-time macros: env!("CARGO_PKG_VERSION") is the version from
//      Cargo.toml, and concat! glues string literals together
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FailureClass;
    use mockito::Server;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), None).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok_page() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<p>Hello there, world</p>")
            .expect(1)
            .create_async()
            .await;

        let html = fetcher()
            .fetch(&format!("{}/page", server.url()))
            .await
            .unwrap();
        assert_eq!(html, "<p>Hello there, world</p>");

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_a_status_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let err = fetcher()
            .fetch(&format!("{}/missing", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_fails() {
        // Port 9 (discard) on localhost is almost never listening
        let err = fetcher().fetch("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(
            err.class(),
            FailureClass::Network | FailureClass::Request | FailureClass::Timeout
        ));
    }

    #[tokio::test]
    async fn test_custom_user_agent_is_sent() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/")
            .match_header("user-agent", "test-agent/1.0")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(Duration::from_secs(5), Some("test-agent/1.0")).unwrap();
        fetcher.fetch(&format!("{}/", server.url())).await.unwrap();

        m.assert_async().await;
    }
}
