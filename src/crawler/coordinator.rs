//! Crawl session - main scrape orchestration logic
//!
//! This module contains the three crawl phases and the state they share:
//! - Page discovery: catalog page URLs from the pagination control
//! - URL discovery: listing URLs from every catalog page
//! - Product scraping: one record per listing URL
//!
//! Each phase checkpoints to its own file and is skipped on restart when
//! that file already holds data.

use crate::config::Config;
use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::crawler::parser::{catalog_pages, last_page_number, listing_urls};
use crate::extract::parse_product;
use crate::record::{ProductRecord, ProductUrlEntry};
use crate::state::{RecordStore, UrlQueue};
use crate::storage::{open_storage, CheckpointStore, JsonStore};
use crate::{FetchError, ScraperError};
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Totals reported at the end of the scrape phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Listings turned into records during this run
    pub scraped: usize,
    /// Listings dropped after a fetch or parse failure
    pub dropped: usize,
    /// Records in the checkpoint file, including earlier runs
    pub total_records: usize,
}

/// State owned by one crawl: config, fetcher, checkpoints, queue and records
pub struct CrawlSession {
    config: Config,
    fetcher: Fetcher,
    store: JsonStore,
    queue: UrlQueue,
    records: RecordStore,
    rng: fastrand::Rng,
}

impl CrawlSession {
    /// Creates a session using the checkpoint paths from the configuration
    pub fn new(config: Config) -> Result<Self, ScraperError> {
        let store = open_storage(&config.output);
        Self::with_store(config, store)
    }

    /// Creates a session over an explicit checkpoint store
    pub fn with_store(config: Config, store: JsonStore) -> Result<Self, ScraperError> {
        let fetcher = Fetcher::new(&config.http, &config.retry)?;
        let rng = match config.crawl.shuffle_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Ok(Self {
            config,
            fetcher,
            store,
            queue: UrlQueue::default(),
            records: RecordStore::default(),
            rng,
        })
    }

    /// Runs all three phases
    ///
    /// Page discovery is only needed to find listing URLs, so it is skipped
    /// together with URL discovery when listing URLs were already saved.
    pub async fn run(&mut self) -> Result<ScrapeSummary, ScraperError> {
        tracing::info!("Starting scrape of {}", self.config.site.catalog_url);

        let saved = self.store.load_product_urls()?;
        let entries = if saved.is_empty() {
            let pages = self.discover_catalog_pages().await?;
            self.discover_product_urls(&pages).await?
        } else {
            tracing::info!(
                "Reusing {} listing URLs from {}",
                saved.len(),
                self.store.product_urls_path().display()
            );
            saved
        };

        self.scrape_products(&entries).await
    }

    /// Phase 1: computes the catalog page URLs
    pub async fn discover_catalog_pages(&mut self) -> Result<Vec<String>, ScraperError> {
        let saved = self.store.load_catalog_pages()?;
        if !saved.is_empty() {
            tracing::info!("Reusing {} catalog pages", saved.len());
            return Ok(saved);
        }

        tracing::info!("Discovering catalog pages");
        let catalog_url = self.config.site.catalog_url.clone();
        let page = self.fetch_with_recovery(&catalog_url).await?;

        let last_page = {
            let document = Html::parse_document(&page.body);
            last_page_number(&document)?
        };

        let pages = catalog_pages(&catalog_url, last_page);
        self.store.save_catalog_pages(&pages)?;
        tracing::info!("Catalog has {} pages", pages.len());

        Ok(pages)
    }

    /// Phase 2: collects listing URLs from every catalog page
    ///
    /// Saved URLs are reused verbatim. Otherwise the collection is saved
    /// after every page, so an interrupted discovery keeps its progress.
    pub async fn discover_product_urls(
        &mut self,
        pages: &[String],
    ) -> Result<Vec<ProductUrlEntry>, ScraperError> {
        let mut entries = self.store.load_product_urls()?;
        if !entries.is_empty() {
            tracing::info!("Reusing {} listing URLs", entries.len());
            return Ok(entries);
        }

        for (index, page_url) in pages.iter().enumerate() {
            tracing::info!("page {}/{}", index + 1, pages.len());

            let page = self.fetch_with_recovery(page_url).await?;
            let base = Url::parse(&page.url)?;
            let urls = {
                let document = Html::parse_document(&page.body);
                listing_urls(&document, &base)
            };

            tracing::debug!("Found {} listings on {}", urls.len(), page_url);
            entries.extend(urls.into_iter().map(ProductUrlEntry::new));
            self.store.save_product_urls(&entries)?;
        }

        tracing::info!("Discovered {} listing URLs", entries.len());
        Ok(entries)
    }

    /// Phase 3: scrapes every listing into a record
    ///
    /// Records saved by earlier runs are kept and the full collection is
    /// rewritten after every new record. A listing that fails to fetch or
    /// parse is logged and dropped; it is not retried.
    pub async fn scrape_products(
        &mut self,
        entries: &[ProductUrlEntry],
    ) -> Result<ScrapeSummary, ScraperError> {
        self.records = RecordStore::new(self.store.load_products()?);
        self.queue = UrlQueue::from_entries(entries, &mut self.rng);

        tracing::info!(
            "Scraping {} listings ({} records already saved)",
            self.queue.len(),
            self.records.len()
        );

        let mut summary = ScrapeSummary::default();

        while let Some(target) = self.queue.front().map(str::to_string) {
            tracing::info!("{} listings left, next {}", self.queue.len(), target);

            let page = match self.fetch_with_recovery(&target).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("Dropping listing: {}", e);
                    self.drop_url(e.url());
                    summary.dropped += 1;
                    continue;
                }
            };

            match parse_page(&page) {
                Ok(record) => {
                    self.records.push(record);
                    self.store.save_products(self.records.records())?;
                    summary.scraped += 1;
                }
                Err(e) => {
                    tracing::error!("Dropping listing {}: {}", page.url, e);
                    summary.dropped += 1;
                }
            }
            self.drop_url(&page.url);
        }

        summary.total_records = self.records.len();
        tracing::info!(
            "Scrape finished: {} scraped, {} dropped, {} records total",
            summary.scraped,
            summary.dropped,
            summary.total_records
        );

        Ok(summary)
    }

    /// Fetches a URL, recovering from 404 answers
    ///
    /// On 404 the queue is reshuffled, its first URL becomes the new target
    /// and the session cools down before trying again. Outside the scrape
    /// phase the queue is empty and the same URL is retried.
    async fn fetch_with_recovery(&mut self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut target = url.to_string();
        let mut not_found = 0;
        let cooldown = Duration::from_millis(self.config.http.not_found_cooldown_ms);

        loop {
            match self.fetcher.fetch(&target).await {
                Err(FetchError::NotFound { url }) => {
                    not_found += 1;
                    if not_found >= self.config.retry.max_not_found {
                        return Err(FetchError::NotFound { url });
                    }

                    self.queue.shuffle(&mut self.rng);
                    if let Some(next) = self.queue.front() {
                        target = next.to_string();
                    }

                    tracing::warn!(
                        "{} answered 404, switching to {} after {:?}",
                        url,
                        target,
                        cooldown
                    );
                    tokio::time::sleep(cooldown).await;
                }
                other => return other,
            }
        }
    }

    /// Removes one URL from the queue, the given one when it is queued
    fn drop_url(&mut self, url: &str) {
        if !self.queue.remove(url) {
            self.queue.pop_front();
        }
    }

    pub fn queue(&self) -> &UrlQueue {
        &self.queue
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }
}

fn parse_page(page: &FetchedPage) -> Result<ProductRecord, ScraperError> {
    let document = Html::parse_document(&page.body);
    Ok(parse_product(&document, &page.url)?)
}

/// Runs the main scrape operation
///
/// # Example
///
/// ```no_run
/// use casa_scraper::config::load_config;
/// use casa_scraper::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("scraper.toml"))?;
/// let summary = run_crawl(config).await?;
/// println!("{} records", summary.total_records);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<ScrapeSummary, ScraperError> {
    let mut session = CrawlSession::new(config)?;
    session.run().await
}
