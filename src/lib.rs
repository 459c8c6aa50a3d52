//! hslinks: CLI scraper for HorribleSubs episode download links.
//!
//! Fetches paginated episode listings, parses each page into
//! show -> episode -> resolution -> link records, and prints the merged
//! catalog as tab-separated rows or JSON.

pub mod cli;
pub mod model;
pub mod output;
pub mod scraper;

// Re-exports for CLI and consumers.
pub use model::{EpisodeList, LinkKind, ShowCatalog};
pub use output::{write_json, write_tsv, OutputError, OutputFormat};
pub use scraper::{
    scrape_show, EpisodeListParser, PageMode, PoliteClient, PoliteClientBuilder, ScrapeOptions,
    ScraperError,
};
