//! Output module for reporting on scrape results
//!
//! This module handles:
//! - Computing statistics over the checkpoint files
//! - Printing them for the `--stats` mode

pub mod stats;

pub use stats::{load_statistics, print_statistics, ScrapeStatistics};
