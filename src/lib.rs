//! Casa-Scraper: a polite real-estate listing scraper
//!
//! This crate crawls the paginated catalog of a real-estate listing site,
//! discovers listing URLs, fetches every listing page and extracts structured
//! records (title, description, price, seller, photos and attributes) into
//! resumable JSON checkpoint files.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Casa-Scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by the HTTP fetcher once its local recovery is used up
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Page not found: {url}")]
    NotFound { url: String },

    #[error("Giving up on {url} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

impl FetchError {
    /// The URL the last attempt was made against
    pub fn url(&self) -> &str {
        match self {
            Self::NotFound { url } | Self::RetriesExhausted { url, .. } => url,
        }
    }
}

/// Errors raised while extracting data from a fetched document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Required element not found: {selector}")]
    MissingElement { selector: &'static str },

    #[error("Invalid field: {0}")]
    Field(#[from] FieldError),

    #[error("Invalid pagination: {0}")]
    Pagination(String),
}

/// Errors raised by a single attribute extractor
#[derive(Debug, Error)]
pub enum FieldError {
    /// The feature item has no value span; the attribute is skipped
    #[error("Feature item has no value")]
    MissingValue,

    /// The value is present but unusable; fails the whole listing
    #[error("Malformed {field} value '{value}': {reason}")]
    Malformed {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias for Casa-Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for extraction operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::parse_product;
pub use record::{AttributeValue, ProductRecord, ProductUrlEntry};
pub use state::{RecordStore, UrlQueue};
