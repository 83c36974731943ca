//! Storage module for persisting scrape checkpoints
//!
//! This module handles the three checkpoint files a crawl resumes from:
//! - Catalog page URLs (page discovery)
//! - Listing URLs (URL discovery)
//! - Scraped records (product scraping)

mod json;
mod traits;

pub use json::JsonStore;
pub use traits::{CheckpointStore, StorageError, StorageResult};

use crate::config::OutputConfig;

/// Opens the JSON checkpoint files named in the output configuration
pub fn open_storage(config: &OutputConfig) -> JsonStore {
    JsonStore::new(
        &config.catalog_pages_path,
        &config.product_urls_path,
        &config.products_path,
    )
}
