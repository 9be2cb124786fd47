// src/fetch/error.rs
// =============================================================================
// The ways fetching a page can fail.
//
// `FetchError` carries the details (status code, error message) for logs.
// `FailureClass` is the coarse category that ends up in crawl results and
// JSON summaries, so a site-wide outage can be told apart from a site that
// simply has no text.
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request took longer than the per-request timeout
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    /// Could not connect (DNS failure, refused connection, TLS handshake)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Connected, but reading the body failed
    #[error("failed to read body: {0}")]
    Body(String),

    /// Any other request error (bad URL, too many redirects, ...)
    #[error("request failed: {0}")]
    Request(String),

    /// The site's overall deadline passed before the page arrived
    #[error("site deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    Timeout,
    HttpStatus,
    Network,
    Request,
    Deadline,
}

impl FetchError {
    pub fn class(&self) -> FailureClass {
        match self {
            FetchError::Timeout => FailureClass::Timeout,
            FetchError::Status(_) => FailureClass::HttpStatus,
            FetchError::Connect(_) | FetchError::Body(_) => FailureClass::Network,
            FetchError::Request(_) => FailureClass::Request,
            FetchError::DeadlineExceeded => FailureClass::Deadline,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(error.to_string())
        } else {
            FetchError::Request(error.to_string())
        }
    }
}
