//! Listing API adapter. Builds paginated requests against the fixed endpoint,
//! feeds each page body to a fresh parser, and merges results into the
//! caller's catalog.

use crate::model::ShowCatalog;
use crate::scraper::episodes::EpisodeListParser;
use crate::scraper::error::ScraperError;
use crate::scraper::{PageMode, PoliteClient, ScrapeOptions};
use reqwest::Url;
use std::time::{SystemTime, UNIX_EPOCH};

const HORRIBLESUBS_API_URL: &str = "https://horriblesubs.info/api.php";

/// Literal response body signaling the end of pagination. The sentinel page
/// is never parsed.
const DONE_SENTINEL: &str = "DONE";

/// Millisecond unix timestamp used as the cache-buster query parameter.
fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Build the listing URL for one page of one show. Page 0 omits `nextid`.
fn page_url(show_id: u64, page: u64) -> Result<Url, ScraperError> {
    let mut params = vec![
        ("method", "getshows".to_string()),
        ("type", "show".to_string()),
        ("showid", show_id.to_string()),
        ("_", timestamp_millis().to_string()),
    ];
    if page != 0 {
        params.push(("nextid", page.to_string()));
    }
    Url::parse_with_params(HORRIBLESUBS_API_URL, &params).map_err(|e| ScraperError::Url {
        reason: e.to_string(),
    })
}

/// Check response status and read the body as text.
fn check_response(
    response: reqwest::blocking::Response,
    url: &str,
) -> Result<String, ScraperError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response.text().map_err(|e| ScraperError::BodyRead { source: e })
}

/// Fetch one listing page body for a show.
fn fetch_page(client: &mut PoliteClient, show_id: u64, page: u64) -> Result<String, ScraperError> {
    let url = page_url(show_id, page)?;
    let response = client.get(url.as_str()).map_err(|e| ScraperError::Network {
        url: url.to_string(),
        source: e,
    })?;
    check_response(response, url.as_str())
}

/// Page loop over a fetch function. In all-pages mode, pagination stops when
/// a body equals the sentinel, which is never handed to the parser; in
/// first-page mode, exactly one page is fetched and parsed as-is. Returns the
/// number of pages parsed.
fn scrape_pages<F>(
    mode: PageMode,
    catalog: &mut ShowCatalog,
    mut fetch: F,
) -> Result<u64, ScraperError>
where
    F: FnMut(u64) -> Result<String, ScraperError>,
{
    let mut parsed = 0;
    for page in 0u64.. {
        let body = fetch(page)?;
        if mode == PageMode::AllPages && body == DONE_SENTINEL {
            break;
        }
        catalog.merge(EpisodeListParser::parse(&body)?);
        parsed += 1;
        if mode == PageMode::FirstPage {
            break;
        }
    }
    Ok(parsed)
}

/// Scrape one show id into the catalog. Returns the number of pages parsed.
pub fn scrape_show(
    client: &mut PoliteClient,
    show_id: u64,
    options: &ScrapeOptions<'_>,
    catalog: &mut ShowCatalog,
) -> Result<u64, ScraperError> {
    scrape_pages(options.mode, catalog, |page| {
        if let Some(progress) = options.progress {
            progress(page + 1);
        }
        fetch_page(client, show_id, page)
    })
}
