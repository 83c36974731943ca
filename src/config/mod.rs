//! Configuration module for Casa-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to the defaults for the
//! Rome apartments catalog.
//!
//! # Example
//!
//! ```no_run
//! use casa_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Catalog: {}", config.site.catalog_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, HttpConfig, OutputConfig, RetryConfig, SiteConfig};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash, load_default,
};
pub use validation::validate;
