//! Extraction of structured listing data from fetched documents
//!
//! This module contains:
//! - Per-attribute field extractors (`fields`)
//! - The listing page parser producing a [`ProductRecord`](crate::ProductRecord)
//! - Shared document helpers used by the catalog parser

pub mod fields;
mod product;
pub(crate) mod selectors;

pub use product::{parse_price, parse_product, photo_urls, ATTRIBUTE_LIST_SENTINEL};

use scraper::{ElementRef, Html, Selector};

/// Collects the text of an element, trimmed
pub(crate) fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Elements matching `selector` that come after `anchor` in document order
///
/// Like a forward scan through the document, this includes the anchor's own
/// descendants but never the anchor itself.
pub(crate) fn elements_after<'a>(
    document: &'a Html,
    anchor: &ElementRef<'a>,
    selector: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let anchor_id = anchor.id();

    document
        .root_element()
        .descendants()
        .skip_while(move |node| node.id() != anchor_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |element| selector.matches(element))
}
