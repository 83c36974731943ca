//! Storage traits and error types
//!
//! This module defines the trait interface for checkpoint backends and
//! associated error types.

use crate::record::{ProductRecord, ProductUrlEntry};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error on {path}: {source}")]
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for checkpoint backends
///
/// Each collection is saved whole; a save replaces whatever was stored
/// before. Loading a collection that was never saved yields an empty one.
pub trait CheckpointStore {
    // ===== Catalog Pages =====

    /// Loads the catalog page URLs computed by page discovery
    fn load_catalog_pages(&self) -> StorageResult<Vec<String>>;

    /// Replaces the stored catalog page URLs
    fn save_catalog_pages(&self, pages: &[String]) -> StorageResult<()>;

    // ===== Listing URLs =====

    /// Loads the listing URLs found by URL discovery
    fn load_product_urls(&self) -> StorageResult<Vec<ProductUrlEntry>>;

    /// Replaces the stored listing URLs
    fn save_product_urls(&self, urls: &[ProductUrlEntry]) -> StorageResult<()>;

    // ===== Records =====

    /// Loads every scraped record
    fn load_products(&self) -> StorageResult<Vec<ProductRecord>>;

    /// Replaces the stored records
    fn save_products(&self, products: &[ProductRecord]) -> StorageResult<()>;
}
