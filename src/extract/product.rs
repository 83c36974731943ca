//! Listing page parser
//!
//! Turns a fetched listing document into a [`ProductRecord`]. Title,
//! description and the price block are required; every other piece is
//! optional and degrades independently:
//!
//! | Piece | When absent / unusable |
//! |-------|------------------------|
//! | Seller | `seller: null` |
//! | Price amount | raw phrase as quantity, `currency: null` |
//! | Photo counter | no photos; non-numeric counter → one photo |
//! | Feature item | skipped (unknown label, no value span) |

use crate::extract::fields::{extract_attribute, feature_attribute};
use crate::extract::selectors::{
    ANCHOR, DESCRIPTION, FEATURE_ITEM, PARAGRAPH, PHONE_ANCHOR, PHOTO_TAB, PRICE_BLOCK,
    SUPERVISOR, TITLE,
};
use crate::extract::{elements_after, trimmed_text};
use crate::record::{AttributeValue, Price, PriceQuantity, ProductRecord, Seller};
use crate::{FieldError, ParseError, ParseResult};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// Footer text marking the end of the feature list
pub const ATTRIBUTE_LIST_SENTINEL: &str = "© 2022 Immobiliare.it";

/// Marker word in front of prices of new developments ("da € 250.000")
const STARTING_FROM: &str = "da";

/// Parses a listing page into a record
///
/// # Arguments
///
/// * `document` - The parsed listing page
/// * `url` - The URL the page was fetched from
///
/// # Returns
///
/// * `Ok(ProductRecord)` - The extracted record
/// * `Err(ParseError)` - A required element is missing or an attribute is malformed
///
/// # Example
///
/// ```no_run
/// use casa_scraper::extract::parse_product;
/// use scraper::Html;
///
/// let html = std::fs::read_to_string("listing.html").unwrap();
/// let document = Html::parse_document(&html);
/// let record = parse_product(&document, "https://www.immobiliare.it/annunci/1/").unwrap();
/// println!("{}", record.title);
/// ```
pub fn parse_product(document: &Html, url: &str) -> ParseResult<ProductRecord> {
    let title = required_text(document, &TITLE, "span.im-titleBlock__title")?;
    let description = required_text(
        document,
        &DESCRIPTION,
        "div.im-description__text.js-readAllText",
    )?;

    let seller = parse_seller(document);

    let price_block = document
        .select(&PRICE_BLOCK)
        .next()
        .ok_or(ParseError::MissingElement {
            selector: "div.im-mainFeatures__title",
        })?;
    let price = parse_price(&trimmed_text(&price_block));

    let photo_counter = document
        .select(&PHOTO_TAB)
        .next()
        .map(|tab| trimmed_text(&tab));
    let photos = photo_urls(url, photo_counter.as_deref());

    let attributes = parse_attributes(document, &price_block)?;

    Ok(ProductRecord {
        title,
        description,
        url: url.to_string(),
        seller,
        price,
        photos,
        attributes,
    })
}

fn required_text(
    document: &Html,
    selector: &Selector,
    name: &'static str,
) -> ParseResult<String> {
    document
        .select(selector)
        .next()
        .map(|element| trimmed_text(&element))
        .ok_or(ParseError::MissingElement { selector: name })
}

/// Agent name and the contact link that follows the phone button
fn parse_seller(document: &Html) -> Option<Seller> {
    let container = document.select(&SUPERVISOR).next()?;
    let name = container
        .select(&PARAGRAPH)
        .next()?
        .text()
        .collect::<String>();
    let phone_button = container.select(&PHONE_ANCHOR).next()?;
    let contact = elements_after(document, &phone_button, &ANCHOR).next()?;

    Some(Seller {
        name,
        phone: contact.value().attr("href").map(str::to_string),
    })
}

/// Splits a price line into currency and amount
///
/// The first token is taken as the currency and the second as the amount,
/// written with `.` thousands separators and a `,` decimal separator. When
/// the amount is not a finite number the whole phrase is kept and the
/// currency is dropped.
pub fn parse_price(text: &str) -> Price {
    let phrase = strip_starting_from(text.trim());
    let mut tokens = phrase.split_whitespace();

    if let (Some(currency), Some(amount)) = (tokens.next(), tokens.next()) {
        let normalized = amount.replace('.', "").replace(',', ".");
        if let Some(amount) = normalized.parse::<f64>().ok().filter(|a| a.is_finite()) {
            return Price {
                quantity: PriceQuantity::Amount(amount),
                currency: Some(currency.to_string()),
            };
        }
    }

    Price {
        quantity: PriceQuantity::Raw(phrase.to_string()),
        currency: None,
    }
}

fn strip_starting_from(text: &str) -> &str {
    match text.strip_prefix(STARTING_FROM) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => text,
    }
}

/// Photo anchors for a listing, one per photo announced by the counter
///
/// `counter` is the text of the photo tab (e.g. "12 foto"), `None` when the
/// tab is absent.
pub fn photo_urls(url: &str, counter: Option<&str>) -> Vec<String> {
    let Some(counter) = counter else {
        return Vec::new();
    };

    match counter
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<u32>().ok())
    {
        Some(count) => (1..=count).map(|n| format!("{}#foto{}", url, n)).collect(),
        None => vec![format!("{}#foto1", url)],
    }
}

/// Feature items after the price block, up to the footer sentinel
fn parse_attributes(
    document: &Html,
    price_block: &ElementRef<'_>,
) -> Result<BTreeMap<String, AttributeValue>, FieldError> {
    let mut attributes = BTreeMap::new();

    for item in elements_after(document, price_block, &FEATURE_ITEM) {
        if trimmed_text(&item).contains(ATTRIBUTE_LIST_SENTINEL) {
            break;
        }

        let Some(attribute) = feature_attribute(&item) else {
            continue;
        };

        match extract_attribute(attribute, &item) {
            Ok(value) => {
                attributes.insert(attribute.key().to_string(), value);
            }
            Err(FieldError::MissingValue) => {
                tracing::trace!("Skipping {} without value", attribute);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(attributes)
}
