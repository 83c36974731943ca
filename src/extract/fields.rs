//! Field extractors for listing feature items
//!
//! Each extractor receives one feature item (`li.nd-list__item`) and reads its
//! nested value span. A missing span yields [`FieldError::MissingValue`] so the
//! caller can skip the attribute; a present but unusable value yields
//! [`FieldError::Malformed`], which fails the whole listing.

use crate::extract::selectors::{FEATURE_LABEL, FEATURE_VALUE};
use crate::extract::trimmed_text;
use crate::record::{Attribute, AttributeValue};
use crate::FieldError;
use chrono::{NaiveDate, NaiveTime};
use scraper::ElementRef;

/// Date format used by the site's "data vendita" feature
const SALE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Reads and translates the Italian label of a feature item
///
/// Returns `None` when the item has no label span or the label is unknown.
pub fn feature_attribute(item: &ElementRef<'_>) -> Option<Attribute> {
    let label = item.select(&FEATURE_LABEL).next()?;
    Attribute::from_label(&trimmed_text(&label))
}

/// Runs the extractor that belongs to `attribute`
pub fn extract_attribute(
    attribute: Attribute,
    item: &ElementRef<'_>,
) -> Result<AttributeValue, FieldError> {
    match attribute {
        Attribute::Locals => parse_locals(item),
        Attribute::DateOfSale => parse_date_of_sale(item),
        Attribute::Surface => parse_surface(item),
        Attribute::Bathrooms => parse_bathrooms(item),
        Attribute::Plan => parse_plan(item),
    }
}

fn value_text(item: &ElementRef<'_>) -> Result<String, FieldError> {
    item.select(&FEATURE_VALUE)
        .next()
        .map(|span| trimmed_text(&span))
        .ok_or(FieldError::MissingValue)
}

/// Number of rooms; "5+" counts as 5, anything non-numeric stays text
pub fn parse_locals(item: &ElementRef<'_>) -> Result<AttributeValue, FieldError> {
    value_text(item).map(|text| count_value(&text))
}

/// Number of bathrooms, same rules as [`parse_locals`]
pub fn parse_bathrooms(item: &ElementRef<'_>) -> Result<AttributeValue, FieldError> {
    value_text(item).map(|text| count_value(&text))
}

/// Sale date rendered as `YYYY-MM-DD HH:MM:SS`
///
/// A feature item without a value span records the attribute as missing
/// rather than skipping it.
pub fn parse_date_of_sale(item: &ElementRef<'_>) -> Result<AttributeValue, FieldError> {
    match value_text(item) {
        Ok(text) => sale_date_value(&text),
        Err(FieldError::MissingValue) => Ok(AttributeValue::Missing),
        Err(e) => Err(e),
    }
}

/// Surface as `{quantity, unit}`, e.g. "90 m²"
pub fn parse_surface(item: &ElementRef<'_>) -> Result<AttributeValue, FieldError> {
    value_text(item).and_then(|text| surface_value(&text))
}

/// Floor, kept verbatim ("Piano terra", "3", ...)
pub fn parse_plan(item: &ElementRef<'_>) -> Result<AttributeValue, FieldError> {
    value_text(item).map(AttributeValue::Text)
}

pub(crate) fn count_value(text: &str) -> AttributeValue {
    let cleaned = text.trim().replace('+', "");
    match cleaned.parse::<i64>() {
        Ok(count) => AttributeValue::Integer(count),
        Err(_) => AttributeValue::Text(cleaned),
    }
}

pub(crate) fn sale_date_value(text: &str) -> Result<AttributeValue, FieldError> {
    let date = NaiveDate::parse_from_str(text.trim(), SALE_DATE_FORMAT).map_err(|e| {
        FieldError::Malformed {
            field: "date_of_sale",
            value: text.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(AttributeValue::Date(date.and_time(NaiveTime::MIN).format("%Y-%m-%d %H:%M:%S").to_string()))
}

pub(crate) fn surface_value(text: &str) -> Result<AttributeValue, FieldError> {
    let malformed = |reason: String| FieldError::Malformed {
        field: "surface",
        value: text.to_string(),
        reason,
    };

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [quantity, unit] = tokens.as_slice() else {
        return Err(malformed(format!(
            "expected quantity and unit, got {} tokens",
            tokens.len()
        )));
    };

    let quantity = quantity
        .parse::<f64>()
        .map_err(|e| malformed(e.to_string()))?;
    if !quantity.is_finite() {
        return Err(malformed("quantity is not a finite number".to_string()));
    }

    Ok(AttributeValue::Quantity {
        quantity,
        unit: unit.to_string(),
    })
}
