//! Statistics generation from checkpoint files
//!
//! This module provides functionality for summarizing what a crawl has
//! saved so far.

use crate::record::ProductRecord;
use crate::storage::CheckpointStore;
use crate::ScraperError;
use std::collections::BTreeMap;

/// Scrape statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeStatistics {
    /// Catalog pages found by page discovery
    pub catalog_pages: usize,

    /// Listing URLs found by URL discovery
    pub product_urls: usize,

    /// Records scraped
    pub products: usize,

    /// Records with seller information
    pub with_seller: usize,

    /// Records whose price is a number
    pub with_numeric_price: usize,

    /// Photo anchors across all records
    pub total_photos: usize,

    /// How many records carry each attribute
    pub attribute_counts: BTreeMap<String, usize>,
}

/// Loads statistics from storage
///
/// # Returns
///
/// * `Ok(ScrapeStatistics)` - Successfully loaded statistics
/// * `Err(ScraperError)` - A checkpoint file could not be read
pub fn load_statistics(store: &dyn CheckpointStore) -> Result<ScrapeStatistics, ScraperError> {
    let mut stats = summarize_records(&store.load_products()?);
    stats.catalog_pages = store.load_catalog_pages()?.len();
    stats.product_urls = store.load_product_urls()?.len();
    Ok(stats)
}

fn summarize_records(records: &[ProductRecord]) -> ScrapeStatistics {
    let mut stats = ScrapeStatistics {
        products: records.len(),
        ..ScrapeStatistics::default()
    };

    for record in records {
        if record.seller.is_some() {
            stats.with_seller += 1;
        }
        if record.price.quantity.as_amount().is_some() {
            stats.with_numeric_price += 1;
        }
        stats.total_photos += record.photos.len();
        for key in record.attributes.keys() {
            *stats.attribute_counts.entry(key.clone()).or_insert(0) += 1;
        }
    }

    stats
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ScrapeStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Checkpoints:");
    println!("  Catalog pages: {}", stats.catalog_pages);
    println!("  Listing URLs: {}", stats.product_urls);
    println!("  Records: {}", stats.products);
    println!();

    println!("Records:");
    println!("  With seller: {}", stats.with_seller);
    println!("  With numeric price: {}", stats.with_numeric_price);
    println!("  Photos: {}", stats.total_photos);
    println!();

    if !stats.attribute_counts.is_empty() {
        println!("Attributes:");
        for (attribute, count) in &stats.attribute_counts {
            println!("  {}: {}", attribute, count);
        }
        println!();
    }

    let coverage = if stats.product_urls > 0 {
        (stats.products as f64 / stats.product_urls as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Coverage: {:.1}% ({} / {} listings scraped)",
        coverage, stats.products, stats.product_urls
    );
}
