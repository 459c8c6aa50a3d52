//! Episode-listing scraper: shared client, page parser, and the paginated
//! fetch loop that ties them together.

mod client;
mod error;

pub mod episodes;
pub mod show;

pub use client::{PoliteClient, PoliteClientBuilder};
pub use episodes::EpisodeListParser;
pub use error::ScraperError;
pub use show::scrape_show;

/// Pagination mode for one show id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Fetch only the first listing page (default).
    FirstPage,
    /// Follow pagination until the server returns the sentinel body.
    AllPages,
}

/// Options for one show scrape: pagination mode and an optional progress
/// callback invoked with the 1-based page number before each fetch.
pub struct ScrapeOptions<'a> {
    pub mode: PageMode,
    pub progress: Option<&'a dyn Fn(u64)>,
}
