//! Catalog page parser
//!
//! This module handles the paginated listing index:
//! - Reading the highest page number from the pagination control
//! - Building the list of catalog page URLs
//! - Extracting listing links from the result cards

use crate::extract::selectors::{CARD_TITLE_LINK, LISTING_CARD, PAGINATION_ITEM, PAGINATION_LIST};
use crate::extract::trimmed_text;
use crate::{ParseError, ParseResult};
use scraper::Html;
use url::Url;

/// Reads the highest page number from the catalog's pagination control
///
/// A catalog without a pagination list has a single page.
///
/// # Returns
///
/// * `Ok(u32)` - The number on the last pagination item
/// * `Err(ParseError)` - The pagination list is empty or its last item is not a number
pub fn last_page_number(document: &Html) -> ParseResult<u32> {
    let Some(list) = document.select(&PAGINATION_LIST).next() else {
        return Ok(1);
    };

    let last = list
        .select(&PAGINATION_ITEM)
        .last()
        .ok_or_else(|| ParseError::Pagination("pagination list has no items".to_string()))?;

    let text = trimmed_text(&last);
    text.parse::<u32>()
        .map_err(|_| ParseError::Pagination(format!("last page '{}' is not a number", text)))
}

/// Builds the catalog page URLs: the base URL, then `?pag=N` for N in 2..=last
///
/// # Example
///
/// ```
/// use casa_scraper::crawler::catalog_pages;
///
/// let pages = catalog_pages("https://example.com/roma/", 3);
/// assert_eq!(
///     pages,
///     vec![
///         "https://example.com/roma/",
///         "https://example.com/roma/?pag=2",
///         "https://example.com/roma/?pag=3",
///     ]
/// );
/// ```
pub fn catalog_pages(base_url: &str, last_page: u32) -> Vec<String> {
    std::iter::once(base_url.to_string())
        .chain((2..=last_page).map(|page| format!("{}?pag={}", base_url, page)))
        .collect()
}

/// Extracts listing URLs from the result cards, in page order
///
/// Cards without a title link are skipped.
pub fn listing_urls(document: &Html, page_url: &Url) -> Vec<String> {
    let mut urls = Vec::new();

    for card in document.select(&LISTING_CARD) {
        let href = card
            .select(&CARD_TITLE_LINK)
            .next()
            .and_then(|link| link.value().attr("href"));

        match href.and_then(|href| resolve_link(href, page_url)) {
            Some(url) => urls.push(url),
            None => tracing::debug!("Skipping listing card without a usable title link"),
        }
    }

    urls
}

/// Resolves a link href to an absolute HTTP(S) URL
///
/// Returns None for empty hrefs, fragment-only links, special schemes and
/// anything that does not resolve to HTTP or HTTPS.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
