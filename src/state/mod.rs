//! State module for tracking scrape progress
//!
//! This module provides the in-memory state owned by a crawl session.
//!
//! # Components
//!
//! - `UrlQueue`: Listing URLs still to be scraped, consumed from the front
//! - `RecordStore`: Records scraped so far, including those loaded on resume

mod queue;
mod records;

// Re-export main types
pub use queue::UrlQueue;
pub use records::RecordStore;
