//! Integration tests for the scraper
//!
//! These tests use wiremock to serve catalog and listing pages and run the
//! crawl phases end-to-end against temporary checkpoint files.

mod common;
mod crawl_tests;
mod fetcher_tests;
