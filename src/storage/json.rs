//! JSON file storage implementation
//!
//! Collections are written pretty-printed with a 4-space indent and UTF-8
//! text left unescaped. Every save goes to a sibling `.tmp` file first and is
//! then renamed over the target, so an interrupted save never leaves a
//! truncated checkpoint behind.

use crate::record::{ProductRecord, ProductUrlEntry};
use crate::storage::traits::{CheckpointStore, StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Checkpoint files on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonStore {
    catalog_pages_path: PathBuf,
    product_urls_path: PathBuf,
    products_path: PathBuf,
}

impl JsonStore {
    /// Creates a store over the three checkpoint paths
    ///
    /// Nothing is touched on disk until the first save.
    pub fn new(
        catalog_pages_path: impl Into<PathBuf>,
        product_urls_path: impl Into<PathBuf>,
        products_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog_pages_path: catalog_pages_path.into(),
            product_urls_path: product_urls_path.into(),
            products_path: products_path.into(),
        }
    }

    /// Creates a store with the default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join("catalog_pages.json"),
            dir.join("product_urls.json"),
            dir.join("products.json"),
        )
    }

    pub fn products_path(&self) -> &Path {
        &self.products_path
    }

    pub fn product_urls_path(&self) -> &Path {
        &self.product_urls_path
    }

    pub fn catalog_pages_path(&self) -> &Path {
        &self.catalog_pages_path
    }

    /// Deletes all checkpoint files so the next crawl starts from scratch
    pub fn reset(&self) -> StorageResult<()> {
        for path in [
            &self.catalog_pages_path,
            &self.product_urls_path,
            &self.products_path,
        ] {
            match fs::remove_file(path) {
                Ok(()) => tracing::info!("Removed checkpoint {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(io_error(path, e)),
            }
        }
        Ok(())
    }
}

impl CheckpointStore for JsonStore {
    fn load_catalog_pages(&self) -> StorageResult<Vec<String>> {
        read_collection(&self.catalog_pages_path)
    }

    fn save_catalog_pages(&self, pages: &[String]) -> StorageResult<()> {
        write_collection(&self.catalog_pages_path, pages)
    }

    fn load_product_urls(&self) -> StorageResult<Vec<ProductUrlEntry>> {
        read_collection(&self.product_urls_path)
    }

    fn save_product_urls(&self, urls: &[ProductUrlEntry]) -> StorageResult<()> {
        write_collection(&self.product_urls_path, urls)
    }

    fn load_products(&self) -> StorageResult<Vec<ProductRecord>> {
        read_collection(&self.products_path)
    }

    fn save_products(&self, products: &[ProductRecord]) -> StorageResult<()> {
        write_collection(&self.products_path, products)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads a JSON array; a missing or blank file is an empty collection
fn read_collection<T: DeserializeOwned>(path: &Path) -> StorageResult<Vec<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|source| StorageError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let tmp_path = tmp_path_for(path);
    let file = File::create(&tmp_path).map_err(|e| io_error(&tmp_path, e))?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    items
        .serialize(&mut serializer)
        .map_err(|source| StorageError::Serialization {
            path: tmp_path.clone(),
            source,
        })?;

    writer.flush().map_err(|e| io_error(&tmp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| io_error(&tmp_path, e))?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|e| io_error(path, e))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
