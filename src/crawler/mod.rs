//! Crawler module for catalog traversal and listing scraping
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with pacing, proxy rotation and bounded retry
//! - Catalog pagination and listing link extraction
//! - The resumable three-phase crawl session

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, CrawlSession, ScrapeSummary};
pub use fetcher::{backoff_delay, build_http_client, FetchedPage, Fetcher};
pub use parser::{catalog_pages, last_page_number, listing_urls};

use crate::config::Config;
use crate::ScraperError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the checkpoint files
/// 2. Discover catalog pages unless listing URLs were already saved
/// 3. Discover listing URLs unless already saved
/// 4. Scrape every listing, saving records as it goes
///
/// # Returns
///
/// * `Ok(ScrapeSummary)` - The listing queue was exhausted
/// * `Err(ScraperError)` - A checkpoint could not be read or written, or
///   catalog discovery failed
pub async fn crawl(config: Config) -> Result<ScrapeSummary, ScraperError> {
    run_crawl(config).await
}
