//! Shared error type for fetching and parsing episode listings.

use thiserror::Error;

/// Scraper error covering request construction, HTTP transport, and the
/// page parser's structural assumptions. None of these are recoverable:
/// every variant aborts the run.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Invalid request URL: {reason}")]
    Url { reason: String },

    #[error("Network error: could not reach {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body: {source}")]
    BodyRead { source: reqwest::Error },

    /// A structural assumption about the episode-list markup was violated.
    /// The page's parse is untrustworthy past this point, so there is no
    /// partial-result recovery.
    #[error("Unexpected episode-list markup: {reason}. The page template may have changed.")]
    MarkupShape { reason: String },
}
